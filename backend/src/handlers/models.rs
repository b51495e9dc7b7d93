use crate::error::AppError;
use crate::services::auth_service::AuthService;
use crate::services::AppIntakeService;
use crate::utils::validation::validation_errors_to_app_error;
use actix_web::{post, web, HttpResponse, Result};
use runway_platform_shared::{
    LoginRequest, ModelApplicationRequest, SUCCESS_APPLICATION_SUBMITTED,
};
use validator::Validate;

/// Public model application endpoint. Creates the pending request and
/// the shadow roster record in one step.
#[post("/signup")]
pub async fn signup(
    body: web::Json<ModelApplicationRequest>,
    intake_service: web::Data<AppIntakeService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let (request, shadow) = intake_service.model_signup(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": SUCCESS_APPLICATION_SUBMITTED,
        "request": request.to_response(),
        "model": shadow.to_response(),
    })))
}

/// Roster login; pending applicants authenticate against their shadow
/// record to check on their application.
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let (model, tokens) = auth_service.login_model(&body).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "access_token": tokens.access_token,
        "refresh_token": tokens.refresh_token,
        "model": model.to_response(),
        "expires_in": tokens.expires_in,
    })))
}
