//! Blocking HTTP helpers for remote feeds.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;

use moo_util::errors::{MooError, MooResult};

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn network_err(message: String) -> MooError {
    MooError::Network { message }
}

/// Build the HTTP client shared by a remote source.
pub fn build_client() -> MooResult<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("moo/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| network_err(format!("Failed to create HTTP client: {e}")))
}

/// Download raw bytes from a URL, retrying timeouts, connection failures and
/// server errors.
///
/// Returns `Ok(None)` for 404.
pub fn get_bytes(client: &Client, url: &str) -> MooResult<Option<Vec<u8>>> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            tracing::debug!("retrying {url} (attempt {})", attempt + 1);
            thread::sleep(RETRY_DELAY * attempt);
        }

        match client.get(url).send() {
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
                    return Err(network_err(format!("HTTP {status} fetching {url}")));
                }
                let bytes = resp
                    .bytes()
                    .map_err(|e| network_err(format!("Failed to read response from {url}: {e}")))?;
                return Ok(Some(bytes.to_vec()));
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                last_err = e.to_string();
            }
            Err(e) => return Err(network_err(format!("Request to {url} failed: {e}"))),
        }
    }

    Err(network_err(format!(
        "Failed after {MAX_RETRIES} retries for {url}: {last_err}"
    )))
}

/// Download a text document (feed pages).
pub fn get_text(client: &Client, url: &str) -> MooResult<Option<String>> {
    Ok(get_bytes(client, url)?.map(|bytes| String::from_utf8_lossy(&bytes).to_string()))
}

/// Send a write request (push or delete). Any non-success status is an error.
pub fn send(request: RequestBuilder, what: &str) -> MooResult<StatusCode> {
    let resp = request
        .send()
        .map_err(|e| network_err(format!("{what} failed: {e}")))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(status);
    }
    let body = resp.text().unwrap_or_default();
    let body = body.trim();
    if body.is_empty() {
        Err(network_err(format!("{what} failed: HTTP {status}")))
    } else {
        Err(network_err(format!("{what} failed: HTTP {status}: {body}")))
    }
}
