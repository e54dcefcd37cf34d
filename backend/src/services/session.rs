//! Session token service
//!
//! A session is a signed token carried in an HttpOnly cookie whose
//! subject is the logged-in farmer's display name. There is no
//! server-side session table: a token stays valid until it expires or
//! the cookie is cleared.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::AppResult;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "agro_session";

/// Claims carried in the session token
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Farmer display name
    sub: String,
    exp: i64,
    iat: i64,
}

/// Session token service
#[derive(Clone)]
pub struct SessionService {
    secret: String,
    ttl_seconds: i64,
}

impl SessionService {
    /// Create a new SessionService instance
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Issue a session token for a logged-in farmer
    pub fn start_session(&self, display_name: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: display_name.to_string(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| anyhow::anyhow!("Session token generation failed: {}", e))?;

        Ok(token)
    }

    /// Return the logged-in farmer's display name, if the token is valid
    pub fn current_user(&self, token: &str) -> Option<String> {
        decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims.sub)
        .ok()
    }
}
