use crate::error::AppError;
use chrono::{DateTime, Utc};
use runway_platform_shared::{AssignmentResponse, AssignmentStatus};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Join record linking a model to a product for a promotional engagement.
/// At most one assignment may exist per (product, model) pair.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ModelAssignment {
    pub id: Uuid,
    pub product_id: Uuid,
    pub model_id: Uuid,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
}

impl ModelAssignment {
    pub async fn insert(
        pool: &PgPool,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<Self, AppError> {
        let assignment = sqlx::query_as::<_, ModelAssignment>(
            r#"
            INSERT INTO model_assignments (product_id, model_id)
            VALUES ($1, $2)
            RETURNING id, product_id, model_id, status, created_at
            "#,
        )
        .bind(product_id)
        .bind(model_id)
        .fetch_one(pool)
        .await?;

        Ok(assignment)
    }

    pub async fn find_pair(
        pool: &PgPool,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<Option<Self>, AppError> {
        let assignment = sqlx::query_as::<_, ModelAssignment>(
            r#"
            SELECT id, product_id, model_id, status, created_at
            FROM model_assignments
            WHERE product_id = $1 AND model_id = $2
            "#,
        )
        .bind(product_id)
        .bind(model_id)
        .fetch_optional(pool)
        .await?;

        Ok(assignment)
    }

    pub fn to_response(&self) -> AssignmentResponse {
        AssignmentResponse {
            id: self.id,
            product_id: self.product_id,
            model_id: self.model_id,
            status: self.status,
            created_at: self.created_at,
        }
    }
}
