//! GNS3 client errors

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the GNS3 controller.
///
/// Non-success status codes are deliberately absent: the client hands every
/// status back to the caller, and each lifecycle operation decides which
/// statuses count as success.
#[derive(Debug, Error)]
pub enum Gns3Error {
    /// Request body could not be serialized; nothing was sent
    #[error("Encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// Request could not be sent or the response could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured request timeout elapsed before a response arrived
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// A success status came back with a body that is not valid JSON
    #[error("Failed to decode {status} response: {source} - Response (first 500 chars): {body}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// Invalid client construction or request arguments
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Gns3Error {
    /// True when the remote side may or may not have applied the request.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Gns3Error::Timeout(_))
    }
}
