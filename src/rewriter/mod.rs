pub mod http;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::consts::UNREACHABLE_MESSAGE;
use crate::form::{RewriteRequest, RewriteResult};

/// Why a rewrite did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    /// The service answered, but not with a success status.
    #[error("Request failed with status code {status}")]
    Server { status: u16, detail: Option<String> },
    /// The request went out but no response came back.
    #[error("no response from server: {0}")]
    Unreachable(String),
    /// Anything else: a bad endpoint, an undecodable payload.
    #[error("{0}")]
    Unexpected(String),
}

impl RewriteError {
    /// The text shown to the user.
    ///
    /// A structured `detail` wins, then the fixed unreachable message, then
    /// the raw description.
    pub fn user_message(&self) -> String {
        match self {
            RewriteError::Server {
                detail: Some(detail),
                ..
            } => format!("Error: {detail}"),
            RewriteError::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            other => format!("An unexpected error occurred: {other}"),
        }
    }
}

/// The remote rewriting service. Could be HTTP, or a test script.
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewriteResult, RewriteError>;

    /// Check the service is up. Returns its greeting.
    async fn ping(&self) -> Result<String, RewriteError> {
        Err(RewriteError::Unexpected(
            "health check not supported".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_shown_verbatim() {
        let err = RewriteError::Server {
            status: 400,
            detail: Some("Culture not supported".to_string()),
        };
        assert_eq!(err.user_message(), "Error: Culture not supported");
    }

    #[test]
    fn unreachable_uses_fixed_message() {
        let err = RewriteError::Unreachable("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "Error: Could not reach the backend server. Is it running?"
        );
    }

    #[test]
    fn server_error_without_detail_falls_back_to_description() {
        let err = RewriteError::Server {
            status: 502,
            detail: None,
        };
        assert_eq!(
            err.user_message(),
            "An unexpected error occurred: Request failed with status code 502"
        );
    }

    #[test]
    fn unexpected_shows_raw_description() {
        let err = RewriteError::Unexpected("invalid JSON".to_string());
        assert_eq!(err.user_message(), "An unexpected error occurred: invalid JSON");
    }
}
