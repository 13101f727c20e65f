pub mod app_state;
pub mod settings;
pub mod task;
pub mod task_fields;
pub mod task_priority;
pub mod task_status;
pub mod user;
