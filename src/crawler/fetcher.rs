//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the engine, including:
//! - Building the HTTP client with fixed request timeouts
//! - Rotating the user agent header across requests
//! - Enforcing a response size cap
//! - Classifying failures into transport, decode, and oversize outcomes

use crate::{Result, WanderError};
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Per-request timeout, independent of the session timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Upper bound on an accepted response body.
const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

/// Identity used when the configured rotation list is empty.
const DEFAULT_AGENT: &str = "wander/1.0";

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// Body fetched and decoded successfully
    Fetched {
        /// Page body content
        body: String,
    },

    /// Connection, DNS, TLS, or timeout trouble
    TransportFailed {
        /// Error description
        error: String,
    },

    /// Response body could not be decoded as text
    DecodeFailed {
        /// Error description
        error: String,
    },

    /// Response exceeds the body size cap
    TooLarge {
        /// Observed size in bytes
        size: u64,
    },
}

/// Builds the HTTP client used for all fetches
///
/// The request timeout is fixed and bounds every individual fetch; the
/// session timeout is handled separately by the lifecycle controller.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .connect_timeout(REQUEST_TIMEOUT)
        .build()
}

/// Fetches a URL with a randomly chosen identity header
///
/// The response status is not inspected: an error page still has a body and
/// its links are as good as any for noise purposes.
///
/// # Returns
///
/// * `Ok(FetchOutcome)` - The classified result of the fetch
/// * `Err(WanderError)` - An unclassified failure that should end the run
pub async fn fetch_url(client: &Client, url: &str, user_agents: &[String]) -> Result<FetchOutcome> {
    let identity = user_agents
        .choose(&mut rand::thread_rng())
        .map(String::as_str)
        .unwrap_or(DEFAULT_AGENT);

    let response = match client.get(url).header(USER_AGENT, identity).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(url, e),
    };

    // Reject oversized bodies before reading when the server declares a length
    if let Some(length) = response.content_length() {
        if length > MAX_BODY_BYTES {
            return Ok(FetchOutcome::TooLarge { size: length });
        }
    }

    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return classify_error(url, e),
    };

    if bytes.len() as u64 > MAX_BODY_BYTES {
        return Ok(FetchOutcome::TooLarge {
            size: bytes.len() as u64,
        });
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(body) => Ok(FetchOutcome::Fetched { body }),
        Err(e) => Ok(FetchOutcome::DecodeFailed {
            error: e.to_string(),
        }),
    }
}

/// Sorts a reqwest error into the fetch outcome taxonomy
///
/// Decode trouble and the whole family of network-level failures are
/// recoverable outcomes. Anything else (client construction bugs and the
/// like) is unexpected and propagates as fatal.
fn classify_error(url: &str, error: reqwest::Error) -> Result<FetchOutcome> {
    if error.is_decode() {
        Ok(FetchOutcome::DecodeFailed {
            error: error.to_string(),
        })
    } else if error.is_timeout()
        || error.is_connect()
        || error.is_request()
        || error.is_body()
        || error.is_redirect()
    {
        Ok(FetchOutcome::TransportFailed {
            error: error.to_string(),
        })
    } else {
        Err(WanderError::Fetch {
            url: url.to_string(),
            source: error,
        })
    }
}
