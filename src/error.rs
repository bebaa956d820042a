// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Why a backend call did not produce a usable value.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Coarse failure classification, used for logging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Timeout,
    Status,
    Malformed,
    Cancelled,
}

impl FailureKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Malformed => "malformed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BackendError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) => FailureKind::Transport,
            Self::Timeout => FailureKind::Timeout,
            Self::Status(_) => FailureKind::Status,
            Self::Malformed(_) => FailureKind::Malformed,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::Status(status)
        } else {
            Self::Transport(err)
        }
    }
}

/// Caller-side precondition violations of `TutorConversation::submit`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("question is empty")]
    EmptyQuestion,

    #[error("a question is already pending for this conversation")]
    Busy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid url in {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },

    #[error("invalid number in {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Errors returned by the stub backend's handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_maps_to_status_kind() {
        let err = BackendError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.kind(), FailureKind::Status);
        assert_eq!(err.to_string(), "backend returned status 500 Internal Server Error");
    }

    #[test]
    fn malformed_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BackendError = serde_err.into();
        assert_eq!(err.kind(), FailureKind::Malformed);
        assert!(err.to_string().starts_with("malformed response"));
    }

    #[test]
    fn app_error_status_codes() {
        let resp = AppError::BadRequest("Question cannot be empty".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = AppError::NotFound("missing".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
