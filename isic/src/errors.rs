//! Errors for this crate.

use crate::transport::RawResponse;
use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum InvalidArchiveUrl {
    #[error("Given URL does not end with \"/api/v1/\": {0}")]
    EndpointVersion(String),

    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),

    #[error("Given URL has no host before \"/api/v1/\": {0}")]
    Host(String),
}

aliri_braid::from_infallible!(InvalidArchiveUrl);

/// A string which is not 24 lowercase hexadecimal characters.
#[derive(thiserror::Error, Debug)]
#[error("\"{0}\" is not a valid object ID")]
pub struct InvalidObjectId(pub String);

aliri_braid::from_infallible!(InvalidObjectId);

/// Errors representing failed interactions with the ISIC Archive.
#[derive(thiserror::Error, Debug)]
pub enum IsicError {
    /// Login was rejected, with the message given by the archive.
    #[error("Login error: {message}")]
    Authentication { message: String },

    /// Caller error, e.g. an empty name or an out-of-range image number.
    #[error("{0}")]
    InvalidArgument(String),

    /// A name which the archive does not know about.
    #[error("{0} not found")]
    NotFound(String),

    /// Response body is not valid JSON.
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Response body is JSON, but not of the expected shape.
    #[error("Unexpected response from the archive: {0}")]
    UnexpectedResponse(String),

    /// Error response with an explanation from the archive.
    #[error("({status:?} {reason:?}): {text}")]
    Status {
        status: StatusCode,
        reason: &'static str,
        text: String,
    },

    /// Error from reqwest, e.g. connection refused.
    #[error(transparent)]
    Raw(#[from] reqwest::Error),

    /// Error from a [crate::Transport] which is not backed by reqwest.
    #[error(transparent)]
    Transport(anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The masked password prompt failed.
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    InvalidUrl(#[from] InvalidArchiveUrl),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// Produce [IsicError::Status] if the response status is not a success.
pub(crate) fn check(res: RawResponse) -> Result<RawResponse, IsicError> {
    if res.status.is_success() {
        Ok(res)
    } else {
        let status = res.status;
        let reason = status.canonical_reason().unwrap_or("unknown reason");
        Err(IsicError::Status {
            status,
            reason,
            text: res.text(),
        })
    }
}
