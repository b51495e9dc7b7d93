use crate::error::AppError;
use crate::models::{Campaign, CampaignAnalytics, Product};
use crate::repositories::PaginationParams;
use runway_platform_shared::{
    CampaignAnalyticsSummary, CreateCampaignRequest, RecordAnalyticsRequest,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Campaign CRUD and time-bucketed analytics for client accounts.
#[derive(Clone)]
pub struct CampaignService {
    pool: PgPool,
}

impl CampaignService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_campaign(
        &self,
        owner_id: Uuid,
        request: &CreateCampaignRequest,
    ) -> Result<Campaign, AppError> {
        if let (Some(starts_on), Some(ends_on)) = (request.starts_on, request.ends_on) {
            if ends_on < starts_on {
                return Err(AppError::Validation(
                    "Campaign cannot end before it starts".to_string(),
                ));
            }
        }

        let campaign = Campaign::create(
            &self.pool,
            owner_id,
            &request.name,
            request.description.as_deref(),
            request.starts_on,
            request.ends_on,
        )
        .await?;

        info!(campaign_id = %campaign.id, %owner_id, "campaign created");

        Ok(campaign)
    }

    pub async fn list_campaigns(
        &self,
        owner_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<Vec<Campaign>, AppError> {
        Campaign::list_for_owner(&self.pool, owner_id, pagination.limit, pagination.offset).await
    }

    async fn owned_campaign(&self, campaign_id: Uuid, caller_id: Uuid) -> Result<Campaign, AppError> {
        let campaign = Campaign::find_by_id(&self.pool, campaign_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Campaign not found".to_string()))?;
        if campaign.owner_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the campaign owner can modify it".to_string(),
            ));
        }
        Ok(campaign)
    }

    pub async fn attach_product(
        &self,
        campaign_id: Uuid,
        product_id: Uuid,
        caller_id: Uuid,
    ) -> Result<(), AppError> {
        let campaign = self.owned_campaign(campaign_id, caller_id).await?;

        Product::find_by_id(&self.pool, product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        // A duplicate attach trips the join table's primary key and
        // surfaces as DuplicateKey.
        Campaign::attach_product(&self.pool, campaign.id, product_id).await?;

        info!(campaign_id = %campaign.id, %product_id, "product attached to campaign");

        Ok(())
    }

    pub async fn detach_product(
        &self,
        campaign_id: Uuid,
        product_id: Uuid,
        caller_id: Uuid,
    ) -> Result<(), AppError> {
        let campaign = self.owned_campaign(campaign_id, caller_id).await?;

        let removed = Campaign::detach_product(&self.pool, campaign.id, product_id).await?;
        if !removed {
            return Err(AppError::NotFound(
                "Product is not part of this campaign".to_string(),
            ));
        }

        Ok(())
    }

    pub async fn record_analytics(
        &self,
        campaign_id: Uuid,
        caller_id: Uuid,
        request: &RecordAnalyticsRequest,
    ) -> Result<CampaignAnalytics, AppError> {
        let campaign = self.owned_campaign(campaign_id, caller_id).await?;

        CampaignAnalytics::record(
            &self.pool,
            campaign.id,
            request.day,
            request.impressions,
            request.engagement,
            request.clicks,
            request.conversions,
        )
        .await
    }

    pub async fn analytics_summary(
        &self,
        campaign_id: Uuid,
        caller_id: Uuid,
    ) -> Result<CampaignAnalyticsSummary, AppError> {
        let campaign = self.owned_campaign(campaign_id, caller_id).await?;
        let rows = CampaignAnalytics::list_for_campaign(&self.pool, campaign.id).await?;
        Ok(summarize(&rows))
    }
}

/// Roll per-day buckets up into campaign totals.
pub fn summarize(rows: &[CampaignAnalytics]) -> CampaignAnalyticsSummary {
    let impressions: i64 = rows.iter().map(|r| r.impressions).sum();
    let engagement: i64 = rows.iter().map(|r| r.engagement).sum();
    let clicks: i64 = rows.iter().map(|r| r.clicks).sum();
    let conversions: i64 = rows.iter().map(|r| r.conversions).sum();

    let engagement_rate = if impressions == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(engagement) / Decimal::from(impressions)
    };

    CampaignAnalyticsSummary {
        days: rows.len(),
        impressions,
        engagement,
        clicks,
        conversions,
        engagement_rate,
        rows: rows.iter().map(CampaignAnalytics::to_row).collect(),
    }
}
