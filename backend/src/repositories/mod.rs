//! Storage layer for the request-lifecycle subsystem.
//!
//! The store traits are the seam between the domain services and the
//! database: services receive an explicitly constructed store at startup
//! instead of reaching for a process-wide client. Decision operations are
//! modeled as atomic conditional transitions so that two concurrent
//! decisions on one request can never both take effect, and operations
//! that pair a request update with a canonical write happen inside a
//! single transaction.

use crate::error::AppError;
use crate::models::{
    Model, ModelAssignment, ModelRequest, NewModel, NewModelRequest, NewProduct,
    NewProductRequest, Product, ProductRequest, User,
};
use runway_platform_shared::{ModelStatus, RequestStatus};
use uuid::Uuid;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgStore;

/// Applicant submissions (model and product requests) and their decisions.
pub trait ApplicationStore {
    async fn find_model_request(&self, id: Uuid) -> Result<Option<ModelRequest>, AppError>;

    /// Duplicate probe across the roster and the request queue.
    async fn model_applicant_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Persist a pending request together with its shadow roster record,
    /// atomically.
    async fn insert_model_application(
        &self,
        request: NewModelRequest,
        shadow: NewModel,
    ) -> Result<(ModelRequest, Model), AppError>;

    async fn list_model_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ModelRequest>, AppError>;

    /// Conditionally approve a pending request and write the canonical
    /// roster record in the same transaction. Returns None when the
    /// request was not pending (including a lost race).
    async fn approve_model_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
        model: NewModel,
    ) -> Result<Option<(ModelRequest, Model)>, AppError>;

    async fn reject_model_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<ModelRequest>, AppError>;

    async fn update_model_request_notes(
        &self,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<ModelRequest>, AppError>;

    async fn find_product_request(&self, id: Uuid) -> Result<Option<ProductRequest>, AppError>;

    async fn product_applicant_exists(
        &self,
        email: &str,
        product_name: &str,
    ) -> Result<bool, AppError>;

    async fn insert_product_request(
        &self,
        request: NewProductRequest,
    ) -> Result<ProductRequest, AppError>;

    async fn list_product_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ProductRequest>, AppError>;

    async fn approve_product_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
        product: NewProduct,
    ) -> Result<Option<(ProductRequest, Product)>, AppError>;

    async fn reject_product_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<ProductRequest>, AppError>;

    async fn update_product_request_notes(
        &self,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<ProductRequest>, AppError>;

    /// Resolve the user account owning an applicant email, if any.
    async fn find_owner_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// The canonical roster of models.
pub trait RosterStore {
    async fn find_model(&self, id: Uuid) -> Result<Option<Model>, AppError>;

    async fn find_model_by_email(&self, email: &str) -> Result<Option<Model>, AppError>;

    async fn model_username_exists(&self, username: &str) -> Result<bool, AppError>;

    /// Apply a signed credit delta atomically, flooring at zero. Returns
    /// the new balance, or None when the model is absent.
    async fn adjust_model_credits(&self, id: Uuid, delta: i64) -> Result<Option<i64>, AppError>;

    async fn set_model_status(
        &self,
        id: Uuid,
        status: ModelStatus,
    ) -> Result<Option<Model>, AppError>;
}

/// Products and their promotional assignments.
pub trait CatalogStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError>;

    async fn find_assignment(
        &self,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<Option<ModelAssignment>, AppError>;

    async fn insert_assignment(
        &self,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<ModelAssignment, AppError>;
}

/// Pagination parameters
#[derive(Debug, Clone)]
pub struct PaginationParams {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationParams {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(20).clamp(1, 100),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}
