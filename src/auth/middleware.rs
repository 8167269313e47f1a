//! Authentication Middleware
//! Mission: Protect API endpoints with bearer token validation

use crate::auth::jwt::{Claims, JwtHandler};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Auth middleware that validates a `Bearer` token from the Authorization
/// header and attaches the verified claims to the request extensions.
///
/// Downstream handlers can read the user id from the claims; none of them
/// currently enforce it against project ownership.
pub async fn auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or(AuthError::MissingToken)?;

    let claims = jwt_handler
        .validate_token(&token)
        .map_err(|_| AuthError::InvalidToken)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extract verified claims from a request (use after auth middleware).
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

/// Auth error types.
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Unauthorized",
            AuthError::InvalidToken => "Invalid token",
        };

        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}
