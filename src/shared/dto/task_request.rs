use serde::{Deserialize, Serialize};

/// Create/update payload. Every field is optional on the wire so that a
/// missing field surfaces as a validation failure instead of a decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
}
