use thiserror::Error;

/// Why a remote read failed.
///
/// Both variants surface to the user as the same error banner; the variant
/// only matters for logging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
  /// Remote unreachable, transport error, or non-success status
  #[error("Network request failed: {0}")]
  NetworkFailure(String),
  /// Response arrived but didn't have the expected shape
  #[error("Unexpected response from server: {0}")]
  MalformedResponse(String),
}

impl FetchError {
  pub fn kind(&self) -> &'static str {
    match self {
      FetchError::NetworkFailure(_) => "network_failure",
      FetchError::MalformedResponse(_) => "malformed_response",
    }
  }
}

impl From<reqwest::Error> for FetchError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() {
      FetchError::MalformedResponse(e.to_string())
    } else {
      FetchError::NetworkFailure(e.to_string())
    }
  }
}

impl From<serde_json::Error> for FetchError {
  fn from(e: serde_json::Error) -> Self {
    FetchError::MalformedResponse(e.to_string())
  }
}
