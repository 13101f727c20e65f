use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One failing field and why it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip)]
    pub missing: bool,
}

impl FieldError {
    /// A field that is present but holds an unusable value.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            missing: false,
        }
    }

    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            missing: true,
            ..Self::new(field, message)
        }
    }
}

/// Every field that failed validation, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", summary(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn has_missing(&self) -> bool {
        self.errors.iter().any(|e| e.missing)
    }
}

fn summary(errors: &[FieldError]) -> &'static str {
    if errors.iter().any(|e| e.missing) {
        "Required fields are missing"
    } else {
        "Some fields are not valid"
    }
}
