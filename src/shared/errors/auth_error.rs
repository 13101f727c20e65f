use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    ack_response::AckResponse, data_access::data_context::DataError,
    validation_error::ValidationError,
};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or invalid token")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Email already registered")]
    EmailTaken,
    #[error("Internal Server Error")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) | AuthError::EmailTaken => StatusCode::BAD_REQUEST,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DataError> for AuthError {
    fn from(e: DataError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AuthError::Internal(format!("token: {e}"))
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AuthError::Internal(format!("password hash: {e}"))
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task: {e}"))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let msg = self.to_string();
        let body = match self {
            AuthError::Validation(validation) => {
                AckResponse::failure_with_errors(msg, validation.errors)
            }
            AuthError::Internal(error) => {
                tracing::error!(%error, "authentication failed internally");
                AckResponse::failure(msg)
            }
            _ => AckResponse::failure(msg),
        };
        (status, Json(body)).into_response()
    }
}
