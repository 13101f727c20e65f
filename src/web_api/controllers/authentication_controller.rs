use axum::{extract::{rejection::JsonRejection, State}, Json};
use tokio::task;

use crate::{
    app_state::SharedState, auth_error::AuthError, authentication::auth,
    login_request::LoginRequest, session_response::SessionResponse,
    signup_request::SignupRequest, validation_error::ValidationError,
};

// Signup and login hash passwords; both run on the blocking pool.
pub struct AuthenticationController {}

impl AuthenticationController {
    pub async fn signup(
        State(state): State<SharedState>,
        payload: Result<Json<SignupRequest>, JsonRejection>,
    ) -> Result<Json<SessionResponse>, AuthError> {
        let Json(request) = payload.map_err(invalid_body)?;
        let session = task::spawn_blocking(move || auth::signup(&state, request)).await??;
        Ok(Json(session))
    }

    pub async fn login(
        State(state): State<SharedState>,
        payload: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Json<SessionResponse>, AuthError> {
        let Json(request) = payload.map_err(invalid_body)?;
        let session = task::spawn_blocking(move || auth::login(&state, request)).await??;
        Ok(Json(session))
    }
}

fn invalid_body(rejection: JsonRejection) -> AuthError {
    ValidationError::single("body", rejection.body_text()).into()
}
