//! Authenticated principal carried by bearer tokens

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Token claims issued by the upstream OAuth login.
///
/// `login` is the opaque user identifier; a token without it does not
/// identify a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalClaims {
    pub sub: String,
    #[serde(default)]
    pub login: Option<String>,
    pub exp: i64,
}

impl PrincipalClaims {
    pub fn new(login: &str, ttl: Duration) -> Self {
        Self {
            sub: login.to_string(),
            login: Some(login.to_string()),
            exp: (Utc::now() + ttl).timestamp(),
        }
    }

    /// Decode and validate an HS256 token
    pub fn from_token(token: &str, secret: &str) -> AppResult<Self> {
        let data = decode::<PrincipalClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))?;
        Ok(data.claims)
    }

    pub fn to_token(&self, secret: &str) -> AppResult<String> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }
}

/// Caller identity; `login` is `None` for anonymous callers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    pub login: Option<String>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref().filter(|login| !login.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.login().is_some()
    }

    /// Login of the caller, or an authentication error
    pub fn require_login(&self) -> AppResult<&str> {
        self.login()
            .ok_or_else(|| AppError::Authentication("Login required".to_string()))
    }
}

impl From<PrincipalClaims> for Principal {
    fn from(claims: PrincipalClaims) -> Self {
        Self {
            login: claims.login,
        }
    }
}
