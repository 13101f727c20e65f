use serde::{Deserialize, Serialize};

use crate::validation_error::FieldError;

/// The bare `{status, msg}` envelope: delete acknowledgements, health, and
/// every failure response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub status: bool,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl AckResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            status: true,
            msg: msg.into(),
            errors: Vec::new(),
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            status: false,
            msg: msg.into(),
            errors: Vec::new(),
        }
    }

    pub fn failure_with_errors(msg: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            status: false,
            msg: msg.into(),
            errors,
        }
    }
}
