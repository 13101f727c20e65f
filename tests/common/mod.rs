//! Shared fixtures for the integration tests.
//!
//! Each test file is its own crate, so not every helper is used everywhere.

#![allow(dead_code)]

use std::fs;

use task_manager::{
    app_state::{AppState, SharedState},
    authentication::auth,
    data_access::data_context::DataContext,
    settings::Settings,
    signup_request::SignupRequest,
};

pub fn test_settings() -> Settings {
    Settings {
        tcp_socket_binding: "127.0.0.1".into(),
        tcp_socket_port: 0,
        database_path: String::new(),
        jwt_secret: "integration-test-secret".into(),
        jwt_expiration_in_minutes: 10,
    }
}

/// Fresh state over a temp database. Remove the returned path when done.
pub fn temp_state(name: &str) -> (SharedState, String) {
    let path = format!("/tmp/task_manager_it_{name}_{}.redb", std::process::id());
    let _ = fs::remove_file(&path);
    let data_context = DataContext::new(&path).unwrap();
    (AppState::new(data_context, test_settings()), path)
}

pub fn cleanup(path: &str) {
    let _ = fs::remove_file(path);
}

pub fn signup_request(name: &str) -> SignupRequest {
    SignupRequest {
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        password: format!("{name}-password"),
    }
}

/// Registers `name` and returns its token.
pub fn sign_up(state: &SharedState, name: &str) -> String {
    auth::signup(state, signup_request(name)).unwrap().token
}
