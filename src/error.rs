use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    ERR_INVALID_CREDENTIALS, ERR_LOGIN_MISSING_FIELDS, ERR_REGISTER_MISSING_FIELDS, ERR_SYSTEM,
    ERR_USERNAME_TAKEN,
};
use crate::store::StoreError;

/// Application error type
///
/// Rendered as `{"error": "..."}`. Internal failures carry the fixed string
/// shown to the caller; the underlying cause is only logged.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Username already taken")]
    UsernameTaken,
}

impl AppError {
    /// Wrap a store failure under the message returned to the caller
    ///
    /// `.map_err(AppError::store(ERR_FETCH_RABBITS))?`
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| match source {
            StoreError::DuplicateUsername => AppError::UsernameTaken,
            source => AppError::Store { context, source },
        }
    }

    pub fn io(context: &'static str) -> impl FnOnce(std::io::Error) -> AppError {
        move |source| AppError::Io { context, source }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        AppError::InvalidInput(message.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Store { context, ref source } => {
                tracing::error!("{}: {:?}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
            AppError::Io { context, ref source } => {
                tracing::error!("{}: {:?}", context, source);
                (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
            }
            AppError::Multipart(ref e) => {
                tracing::warn!("Rejected multipart body: {}", e);
                (e.status(), e.body_text())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UsernameTaken => (StatusCode::BAD_REQUEST, ERR_USERNAME_TAKEN.to_string()),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Registration and login errors
///
/// Rendered as `{"message": "..."}`. Unknown usernames and wrong passwords
/// share [`AuthError::InvalidCredentials`].
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing registration fields")]
    MissingRegistrationFields,

    #[error("Missing username or password")]
    MissingCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AuthError::UsernameTaken,
            err => AuthError::Store(err),
        }
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingRegistrationFields => {
                (StatusCode::BAD_REQUEST, ERR_REGISTER_MISSING_FIELDS)
            }
            AuthError::MissingCredentials => (StatusCode::BAD_REQUEST, ERR_LOGIN_MISSING_FIELDS),
            AuthError::UsernameTaken => (StatusCode::BAD_REQUEST, ERR_USERNAME_TAKEN),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, ERR_INVALID_CREDENTIALS),
            AuthError::MalformedBody(ref detail) => {
                tracing::warn!("Malformed auth request: {}", detail);
                (StatusCode::BAD_REQUEST, ERR_REGISTER_MISSING_FIELDS)
            }
            AuthError::Store(ref e) => {
                tracing::error!("Auth store error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_SYSTEM)
            }
            AuthError::Hash(ref e) => {
                tracing::error!("Password hashing error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_SYSTEM)
            }
            AuthError::TaskJoin(ref e) => {
                tracing::error!("Task join error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, ERR_SYSTEM)
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
