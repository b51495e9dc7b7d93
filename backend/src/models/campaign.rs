use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use runway_platform_shared::{CampaignAnalyticsRow, CampaignResponse, CampaignStatus};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// A marketing campaign owning a set of products (through the
/// campaign_products join) and per-day analytics buckets.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CampaignAnalytics {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub day: NaiveDate,
    pub impressions: i64,
    pub engagement: i64,
    pub clicks: i64,
    pub conversions: i64,
}

const CAMPAIGN_COLUMNS: &str =
    "id, owner_id, name, description, status, starts_on, ends_on, created_at, updated_at";

impl Campaign {
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        starts_on: Option<NaiveDate>,
        ends_on: Option<NaiveDate>,
    ) -> Result<Self, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            INSERT INTO campaigns (owner_id, name, description, starts_on, ends_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CAMPAIGN_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(name)
        .bind(description)
        .bind(starts_on)
        .bind(ends_on)
        .fetch_one(pool)
        .await?;

        Ok(campaign)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, AppError> {
        let campaign = sqlx::query_as::<_, Campaign>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaigns WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(campaign)
    }

    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, AppError> {
        let campaigns = sqlx::query_as::<_, Campaign>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS} FROM campaigns
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(campaigns)
    }

    /// Attach a product to this campaign. The join table's primary key
    /// turns a duplicate attach into a unique violation.
    pub async fn attach_product(
        pool: &PgPool,
        campaign_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO campaign_products (campaign_id, product_id) VALUES ($1, $2)")
            .bind(campaign_id)
            .bind(product_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn detach_product(
        pool: &PgPool,
        campaign_id: Uuid,
        product_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("DELETE FROM campaign_products WHERE campaign_id = $1 AND product_id = $2")
                .bind(campaign_id)
                .bind(product_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    pub fn to_response(&self) -> CampaignResponse {
        CampaignResponse {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            description: self.description.clone(),
            status: self.status,
            starts_on: self.starts_on,
            ends_on: self.ends_on,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl CampaignAnalytics {
    /// Upsert the bucket for (campaign, day); repeated reports for the
    /// same day overwrite rather than accumulate.
    pub async fn record(
        pool: &PgPool,
        campaign_id: Uuid,
        day: NaiveDate,
        impressions: i64,
        engagement: i64,
        clicks: i64,
        conversions: i64,
    ) -> Result<Self, AppError> {
        let row = sqlx::query_as::<_, CampaignAnalytics>(
            r#"
            INSERT INTO campaign_analytics (campaign_id, day, impressions, engagement,
                                            clicks, conversions)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (campaign_id, day) DO UPDATE SET
                impressions = EXCLUDED.impressions,
                engagement = EXCLUDED.engagement,
                clicks = EXCLUDED.clicks,
                conversions = EXCLUDED.conversions
            RETURNING id, campaign_id, day, impressions, engagement, clicks, conversions
            "#,
        )
        .bind(campaign_id)
        .bind(day)
        .bind(impressions)
        .bind(engagement)
        .bind(clicks)
        .bind(conversions)
        .fetch_one(pool)
        .await?;

        Ok(row)
    }

    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: Uuid,
    ) -> Result<Vec<Self>, AppError> {
        let rows = sqlx::query_as::<_, CampaignAnalytics>(
            r#"
            SELECT id, campaign_id, day, impressions, engagement, clicks, conversions
            FROM campaign_analytics
            WHERE campaign_id = $1
            ORDER BY day ASC
            "#,
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub fn to_row(&self) -> CampaignAnalyticsRow {
        CampaignAnalyticsRow {
            day: self.day,
            impressions: self.impressions,
            engagement: self.engagement,
            clicks: self.clicks,
            conversions: self.conversions,
        }
    }
}
