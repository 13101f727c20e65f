use std::fmt;

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Update,
    Delete,
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskAction::Update => f.write_str("update"),
            TaskAction::Delete => f.write_str("delete"),
        }
    }
}

/// Failures of the task operations, in the order they are checked.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Task id not valid")]
    InvalidId,
    /// Reading a task that does not exist, or belongs to someone else.
    #[error("No task found..")]
    NoTask,
    #[error("Task with given id not found")]
    NotFound,
    #[error("You can't {action} task of another user")]
    Forbidden { action: TaskAction },
    #[error("Internal Server Error")]
    Internal(#[from] DataError),
}

impl TaskError {
    // A missing record is reported as 400, not 404.
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::Validation(_)
            | TaskError::InvalidId
            | TaskError::NoTask
            | TaskError::NotFound => StatusCode::BAD_REQUEST,
            TaskError::Forbidden { .. } => StatusCode::FORBIDDEN,
            TaskError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let msg = self.to_string();
        let body = match self {
            TaskError::Validation(validation) => {
                AckResponse::failure_with_errors(msg, validation.errors)
            }
            TaskError::Internal(error) => {
                tracing::error!(%error, "task operation failed");
                AckResponse::failure(msg)
            }
            _ => AckResponse::failure(msg),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation_error::FieldError;
    use rstest::rstest;

    #[rstest]
    #[case(TaskError::InvalidId, StatusCode::BAD_REQUEST)]
    #[case(TaskError::NoTask, StatusCode::BAD_REQUEST)]
    #[case(TaskError::NotFound, StatusCode::BAD_REQUEST)]
    #[case(TaskError::Forbidden { action: TaskAction::Delete }, StatusCode::FORBIDDEN)]
    #[case(TaskError::Internal(DataError::Redb("disk on fire".into())), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_to_status(#[case] error: TaskError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn forbidden_names_the_action() {
        let error = TaskError::Forbidden {
            action: TaskAction::Update,
        };
        assert_eq!(error.to_string(), "You can't update task of another user");
    }

    #[test]
    fn validation_message_follows_the_failure() {
        let invalid = TaskError::from(ValidationError::single(
            "status",
            "Status must be pending or completed",
        ));
        assert_eq!(invalid.to_string(), "Some fields are not valid");

        let missing = TaskError::from(ValidationError::new(vec![FieldError::missing(
            "title",
            "Title is required",
        )]));
        assert_eq!(missing.to_string(), "Required fields are missing");
    }

    #[test]
    fn internal_message_hides_the_cause() {
        let error = TaskError::Internal(DataError::Decode("bad bytes at offset 3".into()));
        assert_eq!(error.to_string(), "Internal Server Error");
    }
}
