//! Error type for `admina-client`.

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A required setting was empty. Carries the environment variable name.
  #[error("{0} is not set")]
  MissingSetting(&'static str),

  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),

  /// The service answered with a 4xx or 5xx status.
  #[error(
    "API error: status={status}, body={body}, timestamp={}",
    .at.to_rfc3339()
  )]
  Status {
    status: StatusCode,
    body:   String,
    at:     DateTime<Utc>,
  },

  /// The response envelope carried an error code.
  #[error("API error: {code} - {message}")]
  Api { code: String, message: String },

  #[error("failed to decode {what}: {source}")]
  Decode {
    what:   &'static str,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
