//! JWT Token Handler
//! Mission: Generate and validate identity tokens securely

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// JWT claims payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // subject (user id)
    pub exp: usize,  // expiration timestamp
}

impl Claims {
    /// The verified user id this token identifies.
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).context("Malformed subject claim")
    }
}

/// JWT handler for token operations. Signed with a process-wide secret
/// loaded at startup.
pub struct JwtHandler {
    secret: String,
    expiration_days: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key.
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_days: 7, // 7-day tokens
        }
    }

    /// Generate a token identifying `user_id`, expiring in 7 days.
    pub fn generate_token(&self, user_id: &Uuid) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::days(self.expiration_days))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration,
        };

        debug!(
            "Generating JWT for user {}, expires in {}d",
            user_id, self.expiration_days
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Validate a token and extract its claims. Fails only when the signature
    /// is invalid, the payload is malformed, or the expiry has passed.
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .context("Invalid or expired token")?;

        debug!("Validated JWT for user {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}
