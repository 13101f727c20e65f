use crate::{
    app_state::{AppState, SharedState},
    auth_error::AuthError,
    login_request::LoginRequest,
    session_response::SessionResponse,
    settings::Settings,
    signup_request::SignupRequest,
    user::User,
    validation::required_text,
    validation_error::{FieldError, ValidationError},
};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_token(user: &User, settings: &Settings) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expiry = now + Duration::minutes(i64::from(settings.jwt_expiration_in_minutes));

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        exp: expiry.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(settings.jwt_secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, settings: &Settings) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Accepts both `Bearer <token>` and a bare token.
pub fn token_from_header(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

pub fn signup(state: &AppState, request: SignupRequest) -> Result<SessionResponse, AuthError> {
    let mut errors = Vec::new();
    let name = required_text(&mut errors, "name", Some(request.name.as_str()));
    let email = required_text(&mut errors, "email", Some(request.email.as_str()));
    let password = required_text(&mut errors, "password", Some(request.password.as_str()));
    if let Some(email) = email {
        if !email.contains('@') {
            errors.push(FieldError::new("email", "Email is not valid"));
        }
    }

    let (Some(name), Some(email), Some(password)) = (name, email, password) else {
        return Err(ValidationError::new(errors).into());
    };
    if !errors.is_empty() {
        return Err(ValidationError::new(errors).into());
    }

    let user = User::new(name, email, password)?;
    if !state.data_context.create_user(&user)? {
        return Err(AuthError::EmailTaken);
    }

    tracing::info!(user_id = %user.id, "account created");
    session_for(&user, &state.settings, "Congratulations!! Account has been created for you..")
}

pub fn login(state: &AppState, request: LoginRequest) -> Result<SessionResponse, AuthError> {
    let mut errors = Vec::new();
    let email = required_text(&mut errors, "email", Some(request.email.as_str()));
    let password = required_text(&mut errors, "password", Some(request.password.as_str()));
    let (Some(email), Some(password)) = (email, password) else {
        return Err(ValidationError::new(errors).into());
    };

    let user = state
        .data_context
        .get_user_by_email(&User::normalize_email(email))?
        .ok_or(AuthError::InvalidCredentials)?;

    if !user.verify_password(password) {
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "logged in");
    session_for(&user, &state.settings, "Login successful..")
}

fn session_for(user: &User, settings: &Settings, msg: &str) -> Result<SessionResponse, AuthError> {
    Ok(SessionResponse {
        user: user.to_get_dto(),
        token: create_token(user, settings)?,
        status: true,
        msg: msg.to_string(),
    })
}

/// Resolves the caller from the `Authorization` header and hands the `User`
/// to handlers through request extensions.
pub async fn auth_middleware(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(token_from_header)
        .ok_or(AuthError::Unauthorized)?;

    let claims = verify_token(token, &state.settings).map_err(|_| AuthError::Unauthorized)?;

    let user = state
        .data_context
        .get_user(claims.sub)?
        .ok_or(AuthError::Unauthorized)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
