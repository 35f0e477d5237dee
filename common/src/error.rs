//! Failure taxonomy for API calls and the single mapping from a failure to
//! the text a page shows.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// A 2xx body without the envelope key the endpoint uses.
    #[error("Response envelope has no `{0}` key")]
    MissingKey(&'static str),

    /// The envelope payload did not match the expected record shape.
    #[error("Malformed response payload: {0}")]
    Decode(String),

    /// A reply of one kind was handed to a consumer expecting another.
    #[error("Unexpected reply: {0}")]
    UnexpectedReply(&'static str),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Page specific wording for failures
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorCopy {
    pub not_found: Option<&'static str>,
    pub generic: &'static str,
}

impl ErrorCopy {
    pub const fn generic(generic: &'static str) -> Self {
        Self {
            not_found: None,
            generic,
        }
    }

    pub const fn with_not_found(not_found: &'static str, generic: &'static str) -> Self {
        Self {
            not_found: Some(not_found),
            generic,
        }
    }
}

/// Maps a failed call to the message shown to the user.
///
/// 404 uses the page's not-found text, a 400 carrying an error body is shown
/// verbatim and everything else falls back to the page's generic text.
pub fn classify(error: &ApiError, copy: &ErrorCopy) -> String {
    match error {
        ApiError::Status { status: 404, .. } => copy.not_found.unwrap_or(copy.generic).to_string(),
        ApiError::Status {
            status: 400,
            message: Some(message),
        } => message.clone(),
        _ => copy.generic.to_string(),
    }
}
