//! Error types for token acquisition, conversion calls and workflows.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed transport error, as returned by the contract traits.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure kinds of the client-credentials flow.
///
/// Every variant is terminal for the run: there is no retry and no fallback token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Client id or secret missing. Raised before any network access.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The identity endpoint could not be reached.
    #[error("network error while requesting access token: {0}")]
    Network(#[source] BoxError),

    /// The identity endpoint answered with a non-success status.
    #[error("access token request failed with status {status}")]
    TokenRequestFailed { status: u16 },

    /// The success body was not valid token JSON.
    #[error("failed to parse token response: {0}")]
    ResponseParse(#[from] serde_json::Error),

    /// The success body had no usable `access_token`.
    #[error("token response did not contain an access_token")]
    TokenMissingInResponse,
}

/// Failure of a single call against the conversion service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: BoxError,
    },

    #[error("{endpoint} responded with status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: BoxError,
    },
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}
