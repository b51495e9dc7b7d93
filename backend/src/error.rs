use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Unique-constraint violations surface as their own variant so
        // handlers can answer 409 instead of a generic 500.
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return AppError::DuplicateKey(db_err.message().to_string());
            }
        }
        AppError::Database(err)
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "validation_error".to_string(),
                message: msg.clone(),
            }),
            AppError::InvalidState(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_state".to_string(),
                message: msg.clone(),
            }),
            AppError::Authentication(msg) => HttpResponse::Unauthorized().json(ErrorResponse {
                error: "authentication_error".to_string(),
                message: msg.clone(),
            }),
            AppError::Jwt(err) => HttpResponse::Unauthorized().json(ErrorResponse {
                error: "authentication_error".to_string(),
                message: err.to_string(),
            }),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(ErrorResponse {
                error: "forbidden".to_string(),
                message: msg.clone(),
            }),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse {
                error: "not_found".to_string(),
                message: msg.clone(),
            }),
            AppError::DuplicateKey(msg) => HttpResponse::Conflict().json(ErrorResponse {
                error: "duplicate_key".to_string(),
                message: msg.clone(),
            }),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(ErrorResponse {
                error: "conflict".to_string(),
                message: msg.clone(),
            }),
            AppError::Upstream(msg) => HttpResponse::BadGateway().json(ErrorResponse {
                error: "upstream_failure".to_string(),
                message: msg.clone(),
            }),
            _ => HttpResponse::InternalServerError().json(ErrorResponse {
                error: "internal_server_error".to_string(),
                message: "An internal server error occurred".to_string(),
            }),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}
