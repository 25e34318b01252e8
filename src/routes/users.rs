//! Account routes: registration and login.

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{json_response, read_json, ResponseBody};
use crate::auth::{hash_password, issue_token, verify_password};
use crate::database::users as db;
use crate::error::ApiError;
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn register(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let body: RegisterRequest = read_json(req).await?;
    if body.username.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Username, email, and password are required.".to_string(),
        ));
    }

    let password_hash = hash_password(&body.password)?;
    let user_id = db::create_user(
        &state.pool,
        body.username.trim(),
        body.email.trim(),
        &password_hash,
    )
    .await?;
    info!(user_id, "registered new user");

    let token = issue_token(user_id, &state.args.jwt_secret, state.args.jwt_expiry_seconds)?;
    Ok(json_response(StatusCode::OK, &TokenResponse { token }))
}

pub async fn login(
    state: &AppState,
    req: Request<Incoming>,
) -> Result<Response<ResponseBody>, ApiError> {
    let body: LoginRequest = read_json(req).await?;
    if body.email.is_empty() || body.password.is_empty() {
        return Err(ApiError::InvalidInput(
            "Email and password are required.".to_string(),
        ));
    }

    let credentials = db::find_credentials_by_email(&state.pool, &body.email).await?;
    let (user_id, stored_hash) = credentials
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials.".to_string()))?;
    if !verify_password(&body.password, &stored_hash)? {
        return Err(ApiError::Unauthorized("Invalid credentials.".to_string()));
    }

    let token = issue_token(user_id, &state.args.jwt_secret, state.args.jwt_expiry_seconds)?;
    Ok(json_response(StatusCode::OK, &TokenResponse { token }))
}
