use crate::error::AppError;
use chrono::{DateTime, Utc};
use runway_platform_shared::{
    ProductRequestResponse, ProductResponse, ProductStatus, RequestStatus,
};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

/// A merchandise submission awaiting an admin decision.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProductRequest {
    pub id: Uuid,
    pub status: RequestStatus,
    pub product_name: String,
    pub description: Option<String>,
    pub category: String,
    pub full_name: String,
    pub email: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub detail_image_url: Option<String>,
    pub requested_model: Option<Uuid>,
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
pub struct NewProductRequest {
    pub product_name: String,
    pub description: Option<String>,
    pub category: String,
    pub full_name: String,
    pub email: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub detail_image_url: Option<String>,
    pub requested_model: Option<Uuid>,
}

/// The canonical catalog entry created when a product request is approved.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub status: ProductStatus,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub detail_image_url: Option<String>,
    pub assigned_model: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub owner_id: Option<Uuid>,
    pub status: ProductStatus,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub detail_image_url: Option<String>,
    pub assigned_model: Option<Uuid>,
}

const PRODUCT_REQUEST_COLUMNS: &str =
    "id, status, product_name, description, category, full_name, email, \
     front_image_url, back_image_url, detail_image_url, requested_model, \
     admin_notes, rejection_reason, approved_by, approved_at, rejected_by, \
     rejected_at, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "id, owner_id, status, name, description, category, \
                               front_image_url, back_image_url, detail_image_url, \
                               assigned_model, created_at, updated_at";

impl ProductRequest {
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        new: &NewProductRequest,
    ) -> Result<Self, AppError> {
        let request = sqlx::query_as::<_, ProductRequest>(&format!(
            r#"
            INSERT INTO product_requests (product_name, description, category,
                                          full_name, email, front_image_url,
                                          back_image_url, detail_image_url,
                                          requested_model)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_REQUEST_COLUMNS}
            "#
        ))
        .bind(&new.product_name)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.full_name)
        .bind(&new.email)
        .bind(&new.front_image_url)
        .bind(&new.back_image_url)
        .bind(&new.detail_image_url)
        .bind(new.requested_model)
        .fetch_one(exec)
        .await?;

        Ok(request)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ProductRequest>(&format!(
            "SELECT {PRODUCT_REQUEST_COLUMNS} FROM product_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    /// Duplicate probe for intake: same applicant email and product name.
    pub async fn applicant_exists(
        pool: &PgPool,
        email: &str,
        product_name: &str,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM product_requests WHERE email = $1 AND product_name = $2)",
        )
        .bind(email)
        .bind(product_name)
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
        let requests = sqlx::query_as::<_, ProductRequest>(&format!(
            r#"
            SELECT {PRODUCT_REQUEST_COLUMNS} FROM product_requests
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

    pub async fn mark_approved(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<&str>,
    ) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ProductRequest>(&format!(
            r#"
            UPDATE product_requests
            SET status = 'approved', approved_by = $2, approved_at = NOW(),
                admin_notes = COALESCE($3, admin_notes), updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {PRODUCT_REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(admin_id)
        .bind(notes)
        .fetch_optional(exec)
        .await?;

        Ok(request)
    }

    pub async fn mark_rejected(
        exec: impl PgExecutor<'_>,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ProductRequest>(&format!(
            r#"
            UPDATE product_requests
            SET status = 'rejected', rejected_by = $2, rejected_at = NOW(),
                rejection_reason = $3, admin_notes = COALESCE($4, admin_notes),
                updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {PRODUCT_REQUEST_COLUMNS}
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

    pub async fn update_notes(
        pool: &PgPool,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<Self>, AppError> {
        let request = sqlx::query_as::<_, ProductRequest>(&format!(
            r#"
            UPDATE product_requests
            SET admin_notes = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(notes)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    pub fn to_response(&self) -> ProductRequestResponse {
        ProductRequestResponse {
            id: self.id,
            status: self.status,
            product_name: self.product_name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            front_image_url: self.front_image_url.clone(),
            back_image_url: self.back_image_url.clone(),
            detail_image_url: self.detail_image_url.clone(),
            requested_model: self.requested_model,
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

impl Product {
    pub async fn insert(exec: impl PgExecutor<'_>, new: &NewProduct) -> Result<Self, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (owner_id, status, name, description, category,
                                  front_image_url, back_image_url, detail_image_url,
                                  assigned_model)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(new.owner_id)
        .bind(new.status)
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.category)
        .bind(&new.front_image_url)
        .bind(&new.back_image_url)
        .bind(&new.detail_image_url)
        .bind(new.assigned_model)
        .fetch_one(exec)
        .await?;

        Ok(product)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(product)
    }

    /// Duplicate probe against the canonical catalog: a product with this
    /// name whose owner account carries the applicant email.
    pub async fn exists_for_applicant(
        pool: &PgPool,
        email: &str,
        product_name: &str,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM products p
                JOIN users u ON p.owner_id = u.id
                WHERE u.email = $1 AND p.name = $2
            )
            "#,
        )
        .bind(email)
        .bind(product_name)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    pub fn to_response(&self) -> ProductResponse {
        ProductResponse {
            id: self.id,
            owner_id: self.owner_id,
            status: self.status,
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            front_image_url: self.front_image_url.clone(),
            back_image_url: self.back_image_url.clone(),
            detail_image_url: self.detail_image_url.clone(),
            assigned_model: self.assigned_model,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
