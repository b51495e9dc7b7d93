use crate::error::AppError;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::auth_service::AuthService;
use crate::utils::jwt::{Claims, JwtService};
use crate::utils::validation::validation_errors_to_app_error;
use actix_web::{get, post, web, HttpResponse, Result};
use runway_platform_shared::{AuthResponse, CreateUserRequest, LoginRequest, SUCCESS_LOGOUT};
use std::sync::Arc;
use validator::Validate;

/// Client account registration. Registered under /api/users/signup.
pub async fn register(
    body: web::Json<CreateUserRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let (user, tokens) = auth_service.register_user(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: user.to_response(),
        expires_in: tokens.expires_in,
    }))
}

/// Client/admin login. Registered under /api/auth/login.
pub async fn login(
    body: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    body.validate().map_err(validation_errors_to_app_error)?;

    let (user, tokens) = auth_service.login_user(&body).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user: user.to_response(),
        expires_in: tokens.expires_in,
    }))
}

#[get("/me")]
pub async fn me(
    user: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user = auth_service.current_user(user.subject_id).await?;
    Ok(HttpResponse::Ok().json(user.to_response()))
}

#[post("/logout")]
pub async fn logout(
    claims: web::ReqData<Claims>,
    jwt_service: web::Data<Arc<JwtService>>,
) -> Result<HttpResponse, AppError> {
    jwt_service.revoke_token(&claims.jti)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": SUCCESS_LOGOUT })))
}
