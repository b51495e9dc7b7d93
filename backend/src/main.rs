use actix_web::{web, App, HttpServer, Result};
use std::sync::Arc;
use tracing::{info, Level};

mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;
mod utils;

use config::AppConfig;
use database::Database;
use error::AppError;
use middleware::auth::AuthMiddleware;
use middleware::rate_limit::RateLimitMiddleware;
use repositories::PgStore;
use runway_platform_shared::{UserRole, LOGIN_RATE_LIMIT_PER_MINUTE, SIGNUP_RATE_LIMIT_PER_MINUTE};
use utils::jwt::JwtService;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(
        "Starting Runway Platform Backend on {}:{}",
        config.host, config.port
    );

    // Initialize database and apply pending migrations
    let database = Database::new(&config.database_url, config.db_max_connections).await?;
    database.migrate().await?;

    // Explicitly constructed collaborators, injected below; nothing here
    // lives in module-level state.
    let jwt_service = Arc::new(JwtService::from_secret(&config.jwt_secret)?);
    let store = PgStore::new(database.pool().clone());
    let revalidator = services::Revalidator::new(
        config.revalidate_webhook_url.clone(),
        config.revalidate_webhook_secret.clone(),
    );

    let auth_service = services::AuthService::new(database.pool().clone(), jwt_service.clone());
    let intake_service = services::IntakeService::new(store.clone());
    let approval_service = services::ApprovalService::new(store.clone(), revalidator.clone());
    let credit_service = services::CreditService::new(store.clone());
    let assignment_service = services::AssignmentService::new(store.clone(), revalidator.clone());
    let campaign_service = services::CampaignService::new(database.pool().clone());

    let host = config.host.clone();
    let port = config.port;

    HttpServer::new(move || {
        let cors = match config.cors_allowed_origin.as_deref() {
            Some(origin) => actix_cors::Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => actix_cors::Cors::permissive(),
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(intake_service.clone()))
            .app_data(web::Data::new(approval_service.clone()))
            .app_data(web::Data::new(credit_service.clone()))
            .app_data(web::Data::new(assignment_service.clone()))
            .app_data(web::Data::new(campaign_service.clone()))
            .service(
                web::scope("/api")
                    .service(handlers::health::health_check)
                    .service(
                        web::scope("/users")
                            .wrap(RateLimitMiddleware::new(SIGNUP_RATE_LIMIT_PER_MINUTE, 60))
                            .route("/signup", web::post().to(handlers::auth::register)),
                    )
                    .service(
                        web::scope("/auth")
                            .service(
                                web::resource("/login")
                                    .wrap(RateLimitMiddleware::new(LOGIN_RATE_LIMIT_PER_MINUTE, 60))
                                    .route(web::post().to(handlers::auth::login)),
                            )
                            .service(
                                web::scope("")
                                    .wrap(AuthMiddleware::new((*jwt_service).clone()))
                                    .service(handlers::auth::me)
                                    .service(handlers::auth::logout),
                            ),
                    )
                    .service(
                        // Public application intake for the roster; rate
                        // limited like the other credential endpoints.
                        web::scope("/models")
                            .wrap(RateLimitMiddleware::new(SIGNUP_RATE_LIMIT_PER_MINUTE, 60))
                            .service(handlers::models::signup)
                            .service(handlers::models::login),
                    )
                    .service(
                        web::scope("/products")
                            .service(handlers::products::apply)
                            .service(handlers::products::get_product)
                            .service(
                                web::scope("")
                                    .wrap(
                                        AuthMiddleware::new((*jwt_service).clone())
                                            .require_role(UserRole::Client),
                                    )
                                    .service(handlers::products::assign_model),
                            ),
                    )
                    .service(
                        web::scope("/campaigns")
                            .wrap(
                                AuthMiddleware::new((*jwt_service).clone())
                                    .require_role(UserRole::Client),
                            )
                            .service(handlers::campaigns::create_campaign)
                            .service(handlers::campaigns::list_campaigns)
                            .service(handlers::campaigns::attach_product)
                            .service(handlers::campaigns::detach_product)
                            .service(handlers::campaigns::record_analytics)
                            .service(handlers::campaigns::analytics_summary),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(
                                AuthMiddleware::new((*jwt_service).clone())
                                    .require_role(UserRole::Admin),
                            )
                            .service(handlers::admin::list_model_requests)
                            .service(handlers::admin::get_model_request)
                            .service(handlers::admin::decide_model_request)
                            .service(handlers::admin::edit_model_request_notes)
                            .service(handlers::admin::list_product_requests)
                            .service(handlers::admin::get_product_request)
                            .service(handlers::admin::decide_product_request)
                            .service(handlers::admin::edit_product_request_notes)
                            .service(handlers::admin::get_model)
                            .service(handlers::admin::adjust_model_credits)
                            .service(handlers::admin::set_model_status),
                    ),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
    .map_err(AppError::from)
}
