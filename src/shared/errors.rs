pub mod auth_error;
pub mod task_error;
pub mod validation_error;
