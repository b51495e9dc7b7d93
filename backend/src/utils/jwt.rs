use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use runway_platform_shared::{UserRole, JWT_ACCESS_TOKEN_EXPIRY, JWT_REFRESH_TOKEN_EXPIRY};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::error::AppError;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,        // Subject (user or model ID)
    pub email: String,      // Email
    pub role: UserRole,     // Principal role
    pub exp: i64,           // Expiration time
    pub iat: i64,           // Issued at
    pub jti: String,        // JWT ID (for token revocation)
    pub token_type: String, // "access" or "refresh"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    revoked_tokens: Arc<RwLock<HashSet<String>>>,
}

impl JwtService {
    /// Build from an explicitly provided secret; lifecycle is owned by
    /// the startup sequence, not module-level state.
    pub fn from_secret(secret: &str) -> Result<Self, AppError> {
        if secret.len() < 32 {
            return Err(AppError::Internal(
                "JWT secret must be at least 32 characters long".to_string(),
            ));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub", "iat"]);
        validation.validate_exp = true;
        validation.leeway = 30; // 30 seconds leeway for clock skew

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            revoked_tokens: Arc::new(RwLock::new(HashSet::new())),
        })
    }

    fn generate_token(
        &self,
        subject: Uuid,
        email: &str,
        role: UserRole,
        token_type: &str,
        lifetime: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            role,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Generate an access token
    pub fn generate_access_token(
        &self,
        subject: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        let lifetime = Duration::from_std(JWT_ACCESS_TOKEN_EXPIRY)
            .map_err(|_| AppError::Internal("Invalid token expiry duration".to_string()))?;
        self.generate_token(subject, email, role, "access", lifetime)
    }

    /// Generate a refresh token
    pub fn generate_refresh_token(
        &self,
        subject: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<String, AppError> {
        let lifetime = Duration::from_std(JWT_REFRESH_TOKEN_EXPIRY)
            .map_err(|_| AppError::Internal("Invalid token expiry duration".to_string()))?;
        self.generate_token(subject, email, role, "refresh", lifetime)
    }

    /// Generate both tokens for a freshly authenticated principal
    pub fn generate_token_pair(
        &self,
        subject: Uuid,
        email: &str,
        role: UserRole,
    ) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(subject, email, role)?,
            refresh_token: self.generate_refresh_token(subject, email, role)?,
            expires_in: JWT_ACCESS_TOKEN_EXPIRY.as_secs() as i64,
        })
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Authentication(format!("Invalid token: {}", e)))?;

        let revoked = self
            .revoked_tokens
            .read()
            .map_err(|_| AppError::Internal("Revocation set poisoned".to_string()))?
            .contains(&data.claims.jti);
        if revoked {
            return Err(AppError::Authentication("Token has been revoked".to_string()));
        }

        Ok(data.claims)
    }

    /// Revoke a token by its ID
    pub fn revoke_token(&self, jti: &str) -> Result<(), AppError> {
        self.revoked_tokens
            .write()
            .map_err(|_| AppError::Internal("Revocation set poisoned".to_string()))?
            .insert(jti.to_string());
        Ok(())
    }
}
