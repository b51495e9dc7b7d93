use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::{AppAssignmentService, AppIntakeService};
use crate::utils::validation::validation_errors_to_app_error;
use actix_web::{get, post, web, HttpResponse, Result};
use runway_platform_shared::{
    AssignModelRequest, ProductApplicationRequest, SUCCESS_APPLICATION_SUBMITTED,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

/// Public product application endpoint.
#[post("/apply")]
pub async fn apply(
    body: web::Json<ProductApplicationRequest>,
    intake_service: web::Data<AppIntakeService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let request = intake_service.product_application(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": SUCCESS_APPLICATION_SUBMITTED,
        "request": request.to_response(),
    })))
}

#[get("/{product_id}")]
pub async fn get_product(
    path: web::Path<Uuid>,
    assignment_service: web::Data<AppAssignmentService>,
) -> Result<HttpResponse, AppError> {
    let product = assignment_service.get_product(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product.to_response()))
}

/// Dashboard assignment action: link a model to an owned product.
#[post("/{product_id}/assign")]
pub async fn assign_model(
    path: web::Path<Uuid>,
    body: web::Json<AssignModelRequest>,
    caller: AuthenticatedUser,
    assignment_service: web::Data<AppAssignmentService>,
) -> Result<HttpResponse, AppError> {
    debug!(caller = %caller.email, model_id = %body.model_id, "assignment requested");

    let assignment = assignment_service
        .assign_model(path.into_inner(), body.model_id, caller.subject_id)
        .await?;

    Ok(HttpResponse::Created().json(assignment.to_response()))
}
