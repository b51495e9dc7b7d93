use crate::error::AppError;
use chrono::{DateTime, Utc};
use runway_platform_shared::{ModelRequestResponse, RequestStatus};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

/// An applicant's roster submission awaiting an admin decision.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ModelRequest {
    pub id: Uuid,
    pub status: RequestStatus,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub credits: i64,
    pub bio: Option<String>,
    pub instagram_handle: Option<String>,
    pub website_url: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<i32>,
    pub experience_years: Option<i32>,
    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewModelRequest {
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub instagram_handle: Option<String>,
    pub website_url: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<i32>,
    pub experience_years: Option<i32>,
}

const REQUEST_COLUMNS: &str = "id, status, full_name, email, avatar_url, credits, bio, \
                               instagram_handle, website_url, age, gender, height_cm, \
                               experience_years, admin_notes, rejection_reason, \
                               approved_by, approved_at, rejected_by, rejected_at, \
                               created_at, updated_at";

impl ModelRequest {
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        new: &NewModelRequest,
    ) -> Result<Self, AppError> {
        let request = sqlx::query_as::<_, ModelRequest>(&format!(
            r#"
            INSERT INTO model_requests (full_name, email, avatar_url, bio,
                                        instagram_handle, website_url, age, gender,
                                        height_cm, experience_years)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.avatar_url)
        .bind(&new.bio)
        .bind(&new.instagram_handle)
        .bind(&new.website_url)
        .bind(new.age)
        .bind(new.gender.as_deref())
        .bind(new.height_cm)
        .bind(new.experience_years)
        .fetch_one(exec)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ModelRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM model_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM model_requests WHERE email = $1)")
                .bind(email)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    pub async fn list(
        pool: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let requests = sqlx::query_as::<_, ModelRequest>(&format!(
            r#"
            SELECT {REQUEST_COLUMNS} FROM model_requests
            WHERE ($1::request_status IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(requests)
    }

    /// Conditional transition pending -> approved. Returns None when the
    /// guard fails, so a concurrent decision cannot be applied twice.
    pub async fn mark_approved(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<&str>,
    ) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ModelRequest>(&format!(
            r#"
            UPDATE model_requests
            SET status = 'approved', approved_by = $2, approved_at = NOW(),
                admin_notes = COALESCE($3, admin_notes), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(admin_id)
        .bind(notes)
        .fetch_optional(exec)
        .await?;

        Ok(request)
    }

    /// Conditional transition pending -> rejected.
    pub async fn mark_rejected(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ModelRequest>(&format!(
            r#"
            UPDATE model_requests
            SET status = 'rejected', rejected_by = $2, rejected_at = NOW(),
                rejection_reason = $3, admin_notes = COALESCE($4, admin_notes),
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(admin_id)
        .bind(reason)
        .bind(notes)
        .fetch_optional(exec)
        .await?;

        Ok(request)
    }

    /// Notes are the only field that stays mutable after a decision.
    pub async fn update_notes(
        pool: &PgPool,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ModelRequest>(&format!(
            r#"
            UPDATE model_requests
            SET admin_notes = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(notes)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    pub fn to_response(&self) -> ModelRequestResponse {
        ModelRequestResponse {
            id: self.id,
            status: self.status,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            avatar_url: self.avatar_url.clone(),
            credits: self.credits,
            bio: self.bio.clone(),
            instagram_handle: self.instagram_handle.clone(),
            website_url: self.website_url.clone(),
            age: self.age,
            gender: self.gender.clone(),
            height_cm: self.height_cm,
            experience_years: self.experience_years,
            admin_notes: self.admin_notes.clone(),
            rejection_reason: self.rejection_reason.clone(),
            approved_by: self.approved_by,
            approved_at: self.approved_at,
            rejected_by: self.rejected_by,
            rejected_at: self.rejected_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
