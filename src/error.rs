//! Error types for the project pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while pulling repositories from the GitHub API.
///
/// None of these are retried; the first one aborts the whole fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The account does not exist (HTTP 404).
    #[error("User \"{account}\" not found")]
    AccountNotFound { account: String },

    /// GitHub refused the request (HTTP 403), normally because the
    /// unauthenticated rate limit ran out.
    #[error("GitHub API rate limit exceeded. Consider setting GITHUB_TOKEN for higher limits.")]
    RateLimited,

    /// Any other non-success status.
    #[error("GitHub API error: {status} {status_text}")]
    Upstream { status: u16, status_text: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Transport(String),

    /// A response arrived but its body was not a repository list.
    #[error("Invalid response from GitHub API: {0}")]
    InvalidResponse(String),

    /// The fetch deadline ran out.
    #[error("GitHub API request timed out")]
    TimedOut,
}

/// Top-level error for the project pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Required configuration is missing.
    #[error("{0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::TimedOut
        } else if e.is_decode() {
            FetchError::InvalidResponse(e.to_string())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}
