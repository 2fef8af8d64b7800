//! Upstream API clients.
//!
//! - [`OpenDotaClient`]: hero stats (cached) and match details (uncached)
//! - [`TmdbClient`]: now-playing movies (cached)
//! - [`OpenAiClient`]: chat completions and web-search responses
//!
//! All clients classify HTTP status the same way through [`check_status`].

pub mod openai;
pub mod opendota;
pub mod tmdb;
pub mod traits;

pub use openai::OpenAiClient;
pub use opendota::OpenDotaClient;
pub use tmdb::TmdbClient;
pub use traits::{ChatProvider, MatchSource, ResearchProvider};

use std::time::Duration;

use reqwest::{Response, StatusCode};

use crate::{CourierError, Result};

/// Upstream error bodies longer than this are not echoed into error messages.
const MAX_ERROR_BODY: usize = 200;

/// Check response status and map to the appropriate error.
///
/// `not_found` is the domain meaning of a 404 for operations that have one;
/// without it a 404 is an ordinary upstream error. On failure the body
/// is drained and, when short, appended to the message.
pub(crate) async fn check_status(
    response: Response,
    not_found: Option<CourierError>,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(not_found) = not_found {
            return Err(not_found);
        }
    }

    let reason = status.canonical_reason().unwrap_or("unknown status");
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    let message = if body.is_empty() || body.len() > MAX_ERROR_BODY {
        reason.to_string()
    } else {
        format!("{reason}: {body}")
    };
    Err(CourierError::Upstream {
        status: status.as_u16(),
        message,
    })
}

/// Build the shared HTTP client.
///
/// `timeout: None` leaves the transport default in place.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| CourierError::Configuration(format!("failed to build HTTP client: {e}")))
}
