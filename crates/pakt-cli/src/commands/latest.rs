//! Handler for `pakt latest`.

use miette::Result;

use pakt_ops::{ops_latest, RegistryOptions};

pub fn exec(name: &str, registry: &RegistryOptions) -> Result<()> {
    let version = ops_latest::latest(name, registry)?;
    println!("{version}");
    Ok(())
}
