//! Blocking HTTP access to the registry.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use pakt_util::errors::{PaktError, PaktResult};

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Build the shared blocking client used for registry requests.
pub fn build_client(timeout: Duration) -> PaktResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pakt/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| PaktError::network(format!("Failed to create HTTP client: {e}")))
}

/// Fetch a URL as text, retrying server errors and connection failures.
///
/// Returns `Ok(None)` for 404 so callers can report the missing package in
/// their own terms.
pub fn fetch_text(client: &Client, url: &str, retries: u32) -> PaktResult<Option<String>> {
    let attempts = retries.max(1);
    let mut last_err = String::new();

    for attempt in 0..attempts {
        if attempt > 0 {
            tracing::warn!("Retrying {url} (attempt {attempt}): {last_err}");
            std::thread::sleep(RETRY_DELAY * attempt);
        }

        match client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
        {
            Ok(resp) => {
                let status = resp.status();
                if status == StatusCode::NOT_FOUND {
                    return Ok(None);
                }
                if status.is_server_error() {
                    last_err = format!("HTTP {status} from {url}");
                    continue;
                }
                if !status.is_success() {
                    return Err(PaktError::network(format!("HTTP {status} fetching {url}")));
                }
                let body = resp.text().map_err(|e| {
                    PaktError::network(format!("Failed to read response from {url}: {e}"))
                })?;
                return Ok(Some(body));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = e.to_string();
                continue;
            }
            Err(e) => {
                return Err(PaktError::network(format!("Request to {url} failed: {e}")));
            }
        }
    }

    Err(PaktError::network(format!(
        "Failed after {attempts} attempts for {url}: {last_err}"
    )))
}
