use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::PaginationParams;
use crate::services::campaign_service::CampaignService;
use crate::utils::validation::validation_errors_to_app_error;
use actix_web::{delete, get, post, web, HttpResponse, Result};
use runway_platform_shared::{
    AttachProductRequest, CreateCampaignRequest, RecordAnalyticsRequest,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ListCampaignsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[post("")]
pub async fn create_campaign(
    body: web::Json<CreateCampaignRequest>,
    caller: AuthenticatedUser,
    campaign_service: web::Data<CampaignService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let campaign = campaign_service
        .create_campaign(caller.subject_id, &body)
        .await?;

    Ok(HttpResponse::Created().json(campaign.to_response()))
}

#[get("")]
pub async fn list_campaigns(
    query: web::Query<ListCampaignsQuery>,
    caller: AuthenticatedUser,
    campaign_service: web::Data<CampaignService>,
) -> Result<HttpResponse, AppError> {
    let pagination = PaginationParams::new(query.limit, query.offset);
    let campaigns = campaign_service
        .list_campaigns(caller.subject_id, &pagination)
        .await?;

    let responses: Vec<_> = campaigns.iter().map(|c| c.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

#[post("/{campaign_id}/products")]
pub async fn attach_product(
    path: web::Path<Uuid>,
    body: web::Json<AttachProductRequest>,
    caller: AuthenticatedUser,
    campaign_service: web::Data<CampaignService>,
) -> Result<HttpResponse, AppError> {
    campaign_service
        .attach_product(path.into_inner(), body.product_id, caller.subject_id)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "message": "Product attached" })))
}

#[delete("/{campaign_id}/products/{product_id}")]
pub async fn detach_product(
    path: web::Path<(Uuid, Uuid)>,
    caller: AuthenticatedUser,
    campaign_service: web::Data<CampaignService>,
) -> Result<HttpResponse, AppError> {
    let (campaign_id, product_id) = path.into_inner();
    campaign_service
        .detach_product(campaign_id, product_id, caller.subject_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Product detached" })))
}

#[post("/{campaign_id}/analytics")]
pub async fn record_analytics(
    path: web::Path<Uuid>,
    body: web::Json<RecordAnalyticsRequest>,
    caller: AuthenticatedUser,
    campaign_service: web::Data<CampaignService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let row = campaign_service
        .record_analytics(path.into_inner(), caller.subject_id, &body)
        .await?;

    Ok(HttpResponse::Ok().json(row.to_row()))
}

#[get("/{campaign_id}/analytics")]
pub async fn analytics_summary(
    path: web::Path<Uuid>,
    caller: AuthenticatedUser,
    campaign_service: web::Data<CampaignService>,
) -> Result<HttpResponse, AppError> {
    let summary = campaign_service
        .analytics_summary(path.into_inner(), caller.subject_id)
        .await?;

    Ok(HttpResponse::Ok().json(summary))
}
