//! Error types for the file switcher
//!
//! Provides unified error handling using thiserror. A friend file that
//! cannot be found is not an error; resolution reports it as `Ok(None)`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Switcher Error Enum ==
/// Unified error type for the file switcher.
#[derive(Error, Debug)]
pub enum SwitcherError {
    /// A resolution is in flight, switching now would use a stale target
    #[error("Currently storing switch file. Cannot switch files yet.")]
    Busy,

    /// No friend file is stored for the current file
    #[error("No friend file was found to switch to for current file.")]
    NoFriend,

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The filesystem query failed or was malformed
    #[error("Search failed: {0}")]
    Search(String),

    /// IO error from the filesystem provider
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for SwitcherError {
    fn into_response(self) -> Response {
        let status = match &self {
            SwitcherError::Busy => StatusCode::CONFLICT,
            SwitcherError::NoFriend => StatusCode::NOT_FOUND,
            SwitcherError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SwitcherError::Search(_) | SwitcherError::Io(_) | SwitcherError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the file switcher.
pub type Result<T> = std::result::Result<T, SwitcherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SwitcherError::Busy.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(SwitcherError::NoFriend.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            SwitcherError::InvalidRequest("bad".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SwitcherError::Search("glob".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_io_conversion() {
        let err: SwitcherError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, SwitcherError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
