pub mod authentication_controller;
pub mod health_controller;
pub mod task_controller;
