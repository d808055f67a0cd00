//! Handler for `pakt exists`.

use miette::Result;

use pakt_ops::{ops_exists, RegistryOptions};

pub fn exec(name: &str, version: &str, registry: &RegistryOptions) -> Result<()> {
    if ops_exists::exists(name, version, registry)? {
        println!("{name}@{version} is published");
    } else {
        println!("{name}@{version} is not published");
    }
    Ok(())
}
