use crate::error::AppError;
use chrono::{DateTime, Utc};
use runway_platform_shared::{ModelResponse, ModelStatus};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

/// A roster member. Created as a pending shadow record at signup so the
/// applicant can authenticate, promoted to active when the matching
/// request is approved.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Model {
    pub id: Uuid,
    pub status: ModelStatus,
    pub full_name: String,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub credits: i64,
    pub height_cm: Option<i32>,
    pub experience_years: Option<i32>,
    pub categories: Vec<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set for inserting or promoting a roster record.
#[derive(Debug, Clone)]
pub struct NewModel {
    pub status: ModelStatus,
    pub full_name: String,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    pub credits: i64,
    pub height_cm: Option<i32>,
    pub experience_years: Option<i32>,
    pub categories: Vec<String>,
    pub bio: Option<String>,
}

const MODEL_COLUMNS: &str = "id, status, full_name, email, username, password_hash, avatar_url, \
                             credits, height_cm, experience_years, categories, bio, \
                             created_at, updated_at";

impl Model {
    /// Insert a fresh roster record (the shadow row created at signup).
    pub async fn insert(exec: impl PgExecutor<'_>, new: &NewModel) -> Result<Self, AppError> {
        let model = sqlx::query_as::<_, Model>(&format!(
            r#"
            INSERT INTO models (status, full_name, email, username, password_hash,
                                avatar_url, credits, height_cm, experience_years,
                                categories, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {MODEL_COLUMNS}
            "#
        ))
        .bind(new.status)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.avatar_url)
        .bind(new.credits)
        .bind(new.height_cm)
        .bind(new.experience_years)
        .bind(&new.categories)
        .bind(&new.bio)
        .fetch_one(exec)
        .await?;

        Ok(model)
    }

    /// Insert-or-promote keyed on the unique email. When a shadow row
    /// already exists its credential hash is kept and the profile fields
    /// are overwritten from the approved request.
    pub async fn upsert_by_email(
        exec: impl PgExecutor<'_>,
        new: &NewModel,
    ) -> Result<Self, AppError> {
        let model = sqlx::query_as::<_, Model>(&format!(
            r#"
            INSERT INTO models (status, full_name, email, username, password_hash,
                                avatar_url, credits, height_cm, experience_years,
                                categories, bio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (email) DO UPDATE SET
                status = EXCLUDED.status,
                full_name = EXCLUDED.full_name,
                username = EXCLUDED.username,
                avatar_url = EXCLUDED.avatar_url,
                credits = EXCLUDED.credits,
                height_cm = EXCLUDED.height_cm,
                experience_years = EXCLUDED.experience_years,
                categories = EXCLUDED.categories,
                bio = EXCLUDED.bio,
                updated_at = NOW()
            RETURNING {MODEL_COLUMNS}
            "#
        ))
        .bind(new.status)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.username)
        .bind(&new.password_hash)
        .bind(&new.avatar_url)
        .bind(new.credits)
        .bind(new.height_cm)
        .bind(new.experience_years)
        .bind(&new.categories)
        .bind(&new.bio)
        .fetch_one(exec)
        .await?;

        Ok(model)
    }

    /// Find model by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let model = sqlx::query_as::<_, Model>(&format!(
            "SELECT {MODEL_COLUMNS} FROM models WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(model)
    }

    /// Find model by email (any status; pending applicants may log in)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, AppError> {
        let model = sqlx::query_as::<_, Model>(&format!(
            "SELECT {MODEL_COLUMNS} FROM models WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(model)
    }

    /// Check if email exists on the roster
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM models WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Check if a derived username is taken
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM models WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Apply a signed credit delta atomically, flooring the balance at
    /// zero. Returns the new balance, or None when the model is absent.
    pub async fn adjust_credits(
        pool: &PgPool,
        id: Uuid,
        delta: i64,
    ) -> Result<Option<i64>, AppError> {
        let credits: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE models
            SET credits = GREATEST(credits + $2, 0), updated_at = NOW()
            WHERE id = $1
            RETURNING credits
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(pool)
        .await?;

        Ok(credits)
    }

    /// Update roster status
    pub async fn set_status(
        pool: &PgPool,
        id: Uuid,
        status: ModelStatus,
    ) -> Result<Option<Self>, AppError> {
        let model = sqlx::query_as::<_, Model>(&format!(
            r#"
            UPDATE models SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {MODEL_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await?;

        Ok(model)
    }

    /// Convert to response DTO (without the credential hash)
    pub fn to_response(&self) -> ModelResponse {
        ModelResponse {
            id: self.id,
            status: self.status,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
            credits: self.credits,
            height_cm: self.height_cm,
            experience_years: self.experience_years,
            categories: self.categories.clone(),
            bio: self.bio.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
