use axum::{middleware, routing::get, Router};

use crate::{
    app_state::SharedState, authentication::auth::auth_middleware,
    task_controller::TaskController,
};

pub const ROUTER_PATH: &str = "/api/tasks";

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(ROUTER_PATH, get(TaskController::get_all).post(TaskController::add))
        .route(
            format!("{}/:task_id", ROUTER_PATH).as_str(),
            get(TaskController::get)
                .put(TaskController::edit)
                .delete(TaskController::delete),
        )
        .layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware))
        .with_state(app_state)
}
