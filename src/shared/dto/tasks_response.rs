use serde::{Deserialize, Serialize};

use crate::task::Task;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
    pub status: bool,
    pub msg: String,
}

impl TasksResponse {
    pub fn new(tasks: Vec<Task>, msg: impl Into<String>) -> Self {
        Self {
            tasks,
            status: true,
            msg: msg.into(),
        }
    }
}
