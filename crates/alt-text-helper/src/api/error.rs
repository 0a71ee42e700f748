//! API error taxonomy.

use thiserror::Error;

/// Errors surfaced by the course backend API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; the message is extracted from the error body.
    #[error("Error occurred! Status: {status}; {message}")]
    Status { status: u16, message: String },

    /// A "found" last-scan response without the expected detail payload.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A mutating call was attempted without a CSRF token. The request is
    /// never sent.
    #[error("CSRF token is missing; refusing to send mutating request")]
    MissingCsrfToken,

    /// The configured base URL could not be used to build request URLs.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
