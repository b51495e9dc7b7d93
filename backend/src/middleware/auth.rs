use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use crate::error::AppError;
use crate::utils::jwt::{Claims, JwtService};
use runway_platform_shared::UserRole;

/// Authenticated principal extracted from a validated JWT.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject_id: uuid::Uuid,
    pub email: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        let subject_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Internal("Invalid subject ID in claims".to_string()))?;

        Ok(Self {
            subject_id,
            email: claims.email.clone(),
        })
    }
}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<Claims>()
                .cloned()
                .ok_or_else(|| AppError::Internal("Claims not found in request".to_string()))?;

            AuthenticatedUser::from_claims(&claims)
        })
    }
}

pub struct AuthMiddleware {
    jwt_service: Rc<JwtService>,
    required_role: Option<UserRole>,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self {
            jwt_service: Rc::new(jwt_service),
            required_role: None,
        }
    }

    pub fn require_role(mut self, role: UserRole) -> Self {
        self.required_role = Some(role);
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_service: self.jwt_service.clone(),
            required_role: self.required_role,
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_service: Rc<JwtService>,
    required_role: Option<UserRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service = self.jwt_service.clone();
        let required_role = self.required_role;
        let service = self.service.clone();

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));

            let token = match auth_header {
                Some(token) => token,
                None => {
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "missing_token",
                        "message": "Authorization token is required"
                    }));
                    return Ok(req.into_response(response));
                }
            };

            let claims = match jwt_service.validate_token(token) {
                Ok(claims) => claims,
                Err(e) => {
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "invalid_token",
                        "message": e.to_string()
                    }));
                    return Ok(req.into_response(response));
                }
            };

            if claims.token_type != "access" {
                let response = HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "invalid_token_type",
                    "message": "Access token required"
                }));
                return Ok(req.into_response(response));
            }

            if let Some(required_role) = required_role {
                if !has_required_role(&claims.role, required_role) {
                    let response = HttpResponse::Forbidden().json(serde_json::json!({
                        "error": "insufficient_permissions",
                        "message": "Insufficient permissions for this operation"
                    }));
                    return Ok(req.into_response(response));
                }
            }

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_boxed_body())
        })
    }
}

/// Role lattice: admins subsume clients; model accounts are a separate
/// principal type and never satisfy client or admin requirements.
fn has_required_role(user_role: &UserRole, required_role: UserRole) -> bool {
    match required_role {
        UserRole::Client => matches!(user_role, UserRole::Client | UserRole::Admin),
        UserRole::Model => matches!(user_role, UserRole::Model),
        UserRole::Admin => matches!(user_role, UserRole::Admin),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use uuid::Uuid;

    async fn test_handler() -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().json(serde_json::json!({"message": "success"})))
    }

    fn setup_jwt_service() -> JwtService {
        JwtService::from_secret("test-secret-key-for-testing-only-0001").expect("jwt service")
    }

    #[actix_web::test]
    async fn test_auth_middleware_no_token() {
        let jwt_service = setup_jwt_service();
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_auth_middleware_valid_token() {
        let jwt_service = setup_jwt_service();
        let token = jwt_service
            .generate_access_token(Uuid::new_v4(), "client@example.com", UserRole::Client)
            .expect("token");

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200);
    }

    #[actix_web::test]
    async fn test_auth_middleware_rejects_refresh_token() {
        let jwt_service = setup_jwt_service();
        let token = jwt_service
            .generate_refresh_token(Uuid::new_v4(), "client@example.com", UserRole::Client)
            .expect("token");

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service))
                .route("/test", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_auth_middleware_role_check() {
        let jwt_service = setup_jwt_service();
        let token = jwt_service
            .generate_access_token(Uuid::new_v4(), "client@example.com", UserRole::Client)
            .expect("token");

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt_service).require_role(UserRole::Admin))
                .route("/admin", web::get().to(test_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 403);
    }

    #[::core::prelude::v1::test]
    fn test_role_lattice() {
        assert!(has_required_role(&UserRole::Client, UserRole::Client));
        assert!(has_required_role(&UserRole::Admin, UserRole::Client));
        assert!(!has_required_role(&UserRole::Model, UserRole::Client));

        assert!(has_required_role(&UserRole::Model, UserRole::Model));
        assert!(!has_required_role(&UserRole::Admin, UserRole::Model));
        assert!(!has_required_role(&UserRole::Client, UserRole::Model));

        assert!(has_required_role(&UserRole::Admin, UserRole::Admin));
        assert!(!has_required_role(&UserRole::Client, UserRole::Admin));
        assert!(!has_required_role(&UserRole::Model, UserRole::Admin));
    }
}
