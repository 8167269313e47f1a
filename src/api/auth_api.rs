//! Authentication API Endpoints
//! Mission: Provide registration and login endpoints

use crate::api::AppState;
use crate::error::ApiError;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

/// Registration/login request body. Fields are optional so missing input
/// maps to a 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn require(self) -> Result<(String, String), ApiError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Ok((email, password))
            }
            _ => Err(ApiError::BadRequest("Email and password required".into())),
        }
    }
}

/// Register endpoint - POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (email, password) = payload.require()?;

    let user = state.users.create_user(&email, &password)?;
    let token = state.jwt.generate_token(&user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered",
            "token": token,
        })),
    ))
}

/// Login endpoint - POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<Value>, ApiError> {
    let (email, password) = payload.require()?;

    // One generic failure for unknown email and wrong password alike.
    let user = state
        .users
        .verify_credentials(&email, &password)?
        .ok_or_else(|| {
            warn!("❌ Failed login attempt");
            ApiError::Unauthorized("Invalid credentials".into())
        })?;

    let token = state.jwt.generate_token(&user.id)?;

    info!("🔐 Login successful: {}", user.email);

    Ok(Json(json!({ "token": token })))
}
