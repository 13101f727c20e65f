use uuid::Uuid;

use crate::{
    task::Task, task_fields::TaskFields, task_request::TaskRequest, task_status::TaskStatus,
    validation::validate_task_request, validation_error::ValidationError,
};

/// Whether a form creates a new task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFormMode {
    Add,
    Edit(Uuid),
}

/// Raw form input, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub deadline: String,
    pub status: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: String::new(),
            deadline: String::new(),
            status: TaskStatus::Pending.to_string(),
        }
    }
}

impl TaskForm {
    pub fn from_task(task: &Task) -> Self {
        let fields = task.fields();
        Self {
            title: fields.title,
            description: fields.description,
            priority: fields.priority.to_string(),
            deadline: fields.deadline.format("%Y-%m-%d").to_string(),
            status: fields.status.to_string(),
        }
    }

    pub fn to_request(&self) -> TaskRequest {
        TaskRequest {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            priority: Some(self.priority.clone()),
            deadline: Some(self.deadline.clone()),
            status: Some(self.status.clone()),
        }
    }

    /// Same checks the server runs, so a bad form never leaves the client.
    pub fn validate(&self) -> Result<TaskFields, ValidationError> {
        validate_task_request(&self.to_request())
    }
}
