use axum::{routing::post, Router};

use crate::{app_state::SharedState, authentication_controller::AuthenticationController};

pub const ROUTER_PATH: &str = "/api/auth";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(format!("{}/signup", ROUTER_PATH).as_str(), post(AuthenticationController::signup))
        .route(format!("{}/login", ROUTER_PATH).as_str(), post(AuthenticationController::login))
        .with_state(app_state)
}
