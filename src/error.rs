use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

/// Every failure a handler or the auth layer can surface to a client.
///
/// The three token failures share one wire message so a client cannot tell a
/// bad signature from an expired token or a vanished account. Logs keep the
/// specific kind.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing or malformed Authorization header")]
    MissingToken,

    #[error("token failed verification")]
    InvalidToken,

    #[error("token subject does not resolve to a user")]
    UserNotFound,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken
            | AppError::InvalidToken
            | AppError::UserNotFound
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DuplicateEmail | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::MissingToken => "Authorization token required".into(),
            AppError::InvalidToken | AppError::UserNotFound => "Invalid token".into(),
            AppError::DuplicateEmail => "User already exists with this email".into(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidCredentials => "Invalid credentials".into(),
            AppError::Forbidden(msg) | AppError::NotFound(msg) => (*msg).into(),
            AppError::Internal(_) => "Internal server error".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            error!(error = ?e, "internal error");
        }
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Parses a path id; anything that is not a UUID cannot name a record.
pub fn parse_id(raw: &str, missing: &'static str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(missing))
}
