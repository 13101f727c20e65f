use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: Task,
    pub status: bool,
    pub msg: String,
}

impl TaskResponse {
    pub fn new(task: Task, msg: impl Into<String>) -> Self {
        Self {
            task,
            status: true,
            msg: msg.into(),
        }
    }
}
