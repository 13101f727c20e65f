// Requests
pub mod task_request;
pub mod login_request;
pub mod signup_request;

// Responses
pub mod ack_response;
pub mod task_response;
pub mod tasks_response;
pub mod session_response;
pub mod user_get_response;
