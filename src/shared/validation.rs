//! Field checks shared by the API and the client-side task form.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    task_error::TaskError,
    task_fields::TaskFields,
    task_priority::TaskPriority,
    task_request::TaskRequest,
    task_status::TaskStatus,
    validation_error::{FieldError, ValidationError},
};

pub fn validate_task_request(request: &TaskRequest) -> Result<TaskFields, ValidationError> {
    let mut errors = Vec::new();

    let title = required_text(&mut errors, "title", request.title.as_deref());
    let description = required_text(&mut errors, "description", request.description.as_deref());

    let priority = required_text(&mut errors, "priority", request.priority.as_deref())
        .and_then(|raw| match raw.parse::<TaskPriority>() {
            Ok(priority) => Some(priority),
            Err(_) => {
                errors.push(FieldError::new("priority", "Priority must be low, medium or high"));
                None
            }
        });

    let deadline = required_text(&mut errors, "deadline", request.deadline.as_deref())
        .and_then(|raw| match parse_deadline(raw) {
            Some(deadline) => Some(deadline),
            None => {
                errors.push(FieldError::new("deadline", "Deadline must be a valid date"));
                None
            }
        });

    let status = required_text(&mut errors, "status", request.status.as_deref())
        .and_then(|raw| match raw.parse::<TaskStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push(FieldError::new("status", "Status must be pending or completed"));
                None
            }
        });

    match (title, description, priority, deadline, status) {
        (Some(title), Some(description), Some(priority), Some(deadline), Some(status)) => {
            Ok(TaskFields {
                title: title.to_string(),
                description: description.to_string(),
                priority,
                deadline,
                status,
            })
        }
        _ => Err(ValidationError::new(errors)),
    }
}

/// Returns the trimmed value, or records `field` as missing.
pub fn required_text<'a>(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text),
        _ => {
            errors.push(FieldError::missing(field, format!("{} is required", capitalize(field))));
            None
        }
    }
}

/// Accepts `YYYY-MM-DD`, or an RFC 3339 date-time whose UTC date is taken.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|moment| moment.with_timezone(&Utc).date_naive())
    })
}

pub fn parse_task_id(raw: &str) -> Result<Uuid, TaskError> {
    Uuid::parse_str(raw).map_err(|_| TaskError::InvalidId)
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
