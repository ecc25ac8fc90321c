//! Session token service (JWT, HS256)

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::auth::errors::AuthError;
use crate::config::AppConfig;

/// Secrets shorter than this are accepted but reported at startup
const RECOMMENDED_SECRET_LEN: usize = 32;

/// JWT claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID
    sub: String,
    /// Issued-at timestamp
    iat: i64,
    /// Expiry timestamp
    exp: i64,
}

/// Issues and verifies stateless session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Errors
    /// [`AuthError::Config`] if the secret is empty; callers treat this as
    /// fatal at startup.
    pub fn new(secret: &str, expiry: Duration) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Config("signing secret is empty".to_string()));
        }
        if secret.len() < RECOMMENDED_SECRET_LEN {
            warn!(
                "JWT secret is shorter than {} characters; use a longer one in production",
                RECOMMENDED_SECRET_LEN
            );
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        Self::new(
            &config.jwt_secret,
            Duration::days(i64::from(config.token_expiry_days)),
        )
    }

    /// Token lifetime
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Issue a token for `user_id`, valid from now for the configured lifetime.
    pub fn generate_token(&self, user_id: &str) -> Result<String, AuthError> {
        self.generate_token_at(user_id, Utc::now())
    }

    fn generate_token_at(&self, user_id: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(self.expiry)
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))?;

        debug!(user_id, "issued session token");
        Ok(token)
    }

    /// Verify signature and expiry, returning the subject.
    pub fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_)
                | ErrorKind::MissingRequiredClaim(_) => AuthError::MalformedToken,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims.sub)
    }
}
