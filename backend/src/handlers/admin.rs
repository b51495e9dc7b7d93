use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::PaginationParams;
use crate::services::{AppApprovalService, AppCreditService};
use crate::utils::validation::validation_errors_to_app_error;
use actix_web::{get, patch, put, web, HttpResponse, Result};
use runway_platform_shared::{
    CreditAdjustmentRequest, CreditAdjustmentResponse, DecisionAction, DecisionRequest,
    EditNotesRequest, ModelStatusUpdateRequest, RequestStatus, SUCCESS_REQUEST_APPROVED,
    SUCCESS_REQUEST_REJECTED,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    pub status: Option<RequestStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[get("/model-requests")]
pub async fn list_model_requests(
    query: web::Query<ListRequestsQuery>,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    let pagination = PaginationParams::new(query.limit, query.offset);
    let requests = approval_service
        .list_model_requests(query.status, &pagination)
        .await?;

    let responses: Vec<_> = requests.iter().map(|r| r.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

#[get("/model-requests/{id}")]
pub async fn get_model_request(
    path: web::Path<Uuid>,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    let request = approval_service
        .get_model_request(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(request.to_response()))
}

/// The only mutation path for a pending model request: approve or
/// reject, exactly once.
#[put("/model-requests/{id}")]
pub async fn decide_model_request(
    path: web::Path<Uuid>,
    body: web::Json<DecisionRequest>,
    admin: AuthenticatedUser,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;
    let request_id = path.into_inner();
    let decision = body.into_inner();

    match decision.action {
        DecisionAction::Approve => {
            let (request, model) = approval_service
                .approve_model_request(request_id, admin.subject_id, decision.admin_notes)
                .await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": SUCCESS_REQUEST_APPROVED,
                "request": request.to_response(),
                "model": model.to_response(),
            })))
        }
        DecisionAction::Reject => {
            let request = approval_service
                .reject_model_request(
                    request_id,
                    admin.subject_id,
                    decision.rejection_reason,
                    decision.admin_notes,
                )
                .await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": SUCCESS_REQUEST_REJECTED,
                "request": request.to_response(),
            })))
        }
    }
}

#[patch("/model-requests/{id}/notes")]
pub async fn edit_model_request_notes(
    path: web::Path<Uuid>,
    body: web::Json<EditNotesRequest>,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;
    let request = approval_service
        .edit_model_request_notes(path.into_inner(), &body.admin_notes)
        .await?;
    Ok(HttpResponse::Ok().json(request.to_response()))
}

#[get("/product-requests")]
pub async fn list_product_requests(
    query: web::Query<ListRequestsQuery>,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    let pagination = PaginationParams::new(query.limit, query.offset);
    let requests = approval_service
        .list_product_requests(query.status, &pagination)
        .await?;

    let responses: Vec<_> = requests.iter().map(|r| r.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

#[get("/product-requests/{id}")]
pub async fn get_product_request(
    path: web::Path<Uuid>,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    let request = approval_service
        .get_product_request(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(request.to_response()))
}

#[put("/product-requests/{id}")]
pub async fn decide_product_request(
    path: web::Path<Uuid>,
    body: web::Json<DecisionRequest>,
    admin: AuthenticatedUser,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;
    let request_id = path.into_inner();
    let decision = body.into_inner();

    match decision.action {
        DecisionAction::Approve => {
            let (request, product) = approval_service
                .approve_product_request(request_id, admin.subject_id, decision.admin_notes)
                .await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": SUCCESS_REQUEST_APPROVED,
                "request": request.to_response(),
                "product": product.to_response(),
            })))
        }
        DecisionAction::Reject => {
            let request = approval_service
                .reject_product_request(
                    request_id,
                    admin.subject_id,
                    decision.rejection_reason,
                    decision.admin_notes,
                )
                .await?;
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "message": SUCCESS_REQUEST_REJECTED,
                "request": request.to_response(),
            })))
        }
    }
}

#[patch("/product-requests/{id}/notes")]
pub async fn edit_product_request_notes(
    path: web::Path<Uuid>,
    body: web::Json<EditNotesRequest>,
    approval_service: web::Data<AppApprovalService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;
    let request = approval_service
        .edit_product_request_notes(path.into_inner(), &body.admin_notes)
        .await?;
    Ok(HttpResponse::Ok().json(request.to_response()))
}

#[get("/models/{id}")]
pub async fn get_model(
    path: web::Path<Uuid>,
    credit_service: web::Data<AppCreditService>,
) -> Result<HttpResponse, AppError> {
    let model = credit_service.get_model(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(model.to_response()))
}

#[patch("/models/{id}/credits")]
pub async fn adjust_model_credits(
    path: web::Path<Uuid>,
    body: web::Json<CreditAdjustmentRequest>,
    credit_service: web::Data<AppCreditService>,
) -> Result<HttpResponse, AppError> {
    let credits = credit_service
        .adjust_credits(path.into_inner(), body.credits)
        .await?;
    Ok(HttpResponse::Ok().json(CreditAdjustmentResponse { credits }))
}

#[patch("/models/{id}/status")]
pub async fn set_model_status(
    path: web::Path<Uuid>,
    body: web::Json<ModelStatusUpdateRequest>,
    credit_service: web::Data<AppCreditService>,
) -> Result<HttpResponse, AppError> {
    let model = credit_service
        .set_status(path.into_inner(), body.status)
        .await?;
    Ok(HttpResponse::Ok().json(model.to_response()))
}
