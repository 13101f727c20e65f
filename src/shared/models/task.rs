use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{task_fields::TaskFields, task_priority::TaskPriority, task_status::TaskStatus};

/// A task owned by exactly one user.
///
/// `id` and `user` never change after creation. Updates replace the five
/// content fields as a whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(owner: Uuid, fields: TaskFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user: owner,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            deadline: fields.deadline,
            status: fields.status,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user == user_id
    }

    pub fn replace_fields(&mut self, fields: TaskFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.priority = fields.priority;
        self.deadline = fields.deadline;
        self.status = fields.status;
        self.updated_at = Utc::now();
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            deadline: self.deadline,
            status: self.status,
        }
    }
}
