use crate::error::AppError;
use crate::models::{Model, User};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::jwt::{JwtService, TokenPair};
use crate::utils::validation::validate_username;
use runway_platform_shared::{
    CreateUserRequest, LoginRequest, UserRole, ERROR_EMAIL_ALREADY_EXISTS,
    ERROR_INVALID_CREDENTIALS, ERROR_USERNAME_ALREADY_EXISTS,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Session issuance for the two principal types: client/admin accounts
/// in the users table, and roster members (including pending shadow
/// records) in the models table.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt: Arc<JwtService>) -> Self {
        Self { pool, jwt }
    }

    pub async fn register_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<(User, TokenPair), AppError> {
        validate_username(&request.username)
            .map_err(|_| AppError::Validation("Invalid username".to_string()))?;

        if User::email_exists(&self.pool, &request.email).await? {
            return Err(AppError::DuplicateKey(ERROR_EMAIL_ALREADY_EXISTS.to_string()));
        }
        if User::username_exists(&self.pool, &request.username).await? {
            return Err(AppError::DuplicateKey(
                ERROR_USERNAME_ALREADY_EXISTS.to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;
        let user = User::create(&self.pool, &request, password_hash).await?;
        let tokens = self.jwt.generate_token_pair(user.id, &user.email, user.role)?;

        info!(user_id = %user.id, "user account registered");

        Ok((user, tokens))
    }

    pub async fn login_user(&self, request: &LoginRequest) -> Result<(User, TokenPair), AppError> {
        let user = User::find_by_email(&self.pool, &request.email)
            .await?
            .ok_or_else(|| AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()))?;

        if !matches!(
            verify_password(&request.password, &user.password_hash),
            Ok(true)
        ) {
            return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self.jwt.generate_token_pair(user.id, &user.email, user.role)?;

        Ok((user, tokens))
    }

    /// Roster login. Pending applicants authenticate against their
    /// shadow record so they can see their application status.
    pub async fn login_model(
        &self,
        request: &LoginRequest,
    ) -> Result<(Model, TokenPair), AppError> {
        let model = Model::find_by_email(&self.pool, &request.email)
            .await?
            .ok_or_else(|| AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()))?;

        if !matches!(
            verify_password(&request.password, &model.password_hash),
            Ok(true)
        ) {
            return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string()));
        }

        let tokens = self
            .jwt
            .generate_token_pair(model.id, &model.email, UserRole::Model)?;

        Ok((model, tokens))
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<User, AppError> {
        User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
