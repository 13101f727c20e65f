use chrono::NaiveDate;

use crate::{task_priority::TaskPriority, task_status::TaskStatus};

/// The five content fields of a task, after validation.
///
/// Only `validation::validate_task_request` builds one from wire input, so
/// holding a `TaskFields` means every field is present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
}
