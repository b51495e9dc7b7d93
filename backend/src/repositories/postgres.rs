use crate::error::AppError;
use crate::models::{
    Model, ModelAssignment, ModelRequest, NewModel, NewModelRequest, NewProduct,
    NewProductRequest, Product, ProductRequest, User,
};
use crate::repositories::{ApplicationStore, CatalogStore, PaginationParams, RosterStore};
use runway_platform_shared::{ModelStatus, RequestStatus};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed store. Single-row operations delegate to the model
/// query methods; paired writes share one transaction here.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ApplicationStore for PgStore {
    async fn find_model_request(&self, id: Uuid) -> Result<Option<ModelRequest>, AppError> {
        ModelRequest::find_by_id(&self.pool, id).await
    }

    async fn model_applicant_exists(&self, email: &str) -> Result<bool, AppError> {
        if Model::email_exists(&self.pool, email).await? {
            return Ok(true);
        }
        ModelRequest::email_exists(&self.pool, email).await
    }

    async fn insert_model_application(
        &self,
        request: NewModelRequest,
        shadow: NewModel,
    ) -> Result<(ModelRequest, Model), AppError> {
        let mut tx = self.pool.begin().await?;
        let request = ModelRequest::insert(&mut *tx, &request).await?;
        let model = Model::insert(&mut *tx, &shadow).await?;
        tx.commit().await?;
        Ok((request, model))
    }

    async fn list_model_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ModelRequest>, AppError> {
        ModelRequest::list(&self.pool, status, pagination.limit, pagination.offset).await
    }

    async fn approve_model_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
        model: NewModel,
    ) -> Result<Option<(ModelRequest, Model)>, AppError> {
        let mut tx = self.pool.begin().await?;
        let request =
            match ModelRequest::mark_approved(&mut *tx, id, admin_id, notes.as_deref()).await? {
                Some(request) => request,
                None => return Ok(None),
            };
        let model = Model::upsert_by_email(&mut *tx, &model).await?;
        tx.commit().await?;
        Ok(Some((request, model)))
    }

    async fn reject_model_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<ModelRequest>, AppError> {
        ModelRequest::mark_rejected(&self.pool, id, admin_id, reason.as_deref(), notes.as_deref())
            .await
    }

    async fn update_model_request_notes(
        &self,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<ModelRequest>, AppError> {
        ModelRequest::update_notes(&self.pool, id, notes).await
    }

    async fn find_product_request(&self, id: Uuid) -> Result<Option<ProductRequest>, AppError> {
        ProductRequest::find_by_id(&self.pool, id).await
    }

    async fn product_applicant_exists(
        &self,
        email: &str,
        product_name: &str,
    ) -> Result<bool, AppError> {
        if Product::exists_for_applicant(&self.pool, email, product_name).await? {
            return Ok(true);
        }
        ProductRequest::applicant_exists(&self.pool, email, product_name).await
    }

    async fn insert_product_request(
        &self,
        request: NewProductRequest,
    ) -> Result<ProductRequest, AppError> {
        ProductRequest::insert(&self.pool, &request).await
    }

    async fn list_product_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ProductRequest>, AppError> {
        ProductRequest::list(&self.pool, status, pagination.limit, pagination.offset).await
    }

    async fn approve_product_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
        product: NewProduct,
    ) -> Result<Option<(ProductRequest, Product)>, AppError> {
        let mut tx = self.pool.begin().await?;
        let request =
            match ProductRequest::mark_approved(&mut *tx, id, admin_id, notes.as_deref()).await? {
                Some(request) => request,
                None => return Ok(None),
            };
        let product = Product::insert(&mut *tx, &product).await?;
        tx.commit().await?;
        Ok(Some((request, product)))
    }

    async fn reject_product_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<ProductRequest>, AppError> {
        ProductRequest::mark_rejected(
            &self.pool,
            id,
            admin_id,
            reason.as_deref(),
            notes.as_deref(),
        )
        .await
    }

    async fn update_product_request_notes(
        &self,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<ProductRequest>, AppError> {
        ProductRequest::update_notes(&self.pool, id, notes).await
    }

    async fn find_owner_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        User::find_by_email(&self.pool, email).await
    }
}

impl RosterStore for PgStore {
    async fn find_model(&self, id: Uuid) -> Result<Option<Model>, AppError> {
        Model::find_by_id(&self.pool, id).await
    }

    async fn find_model_by_email(&self, email: &str) -> Result<Option<Model>, AppError> {
        Model::find_by_email(&self.pool, email).await
    }

    async fn model_username_exists(&self, username: &str) -> Result<bool, AppError> {
        Model::username_exists(&self.pool, username).await
    }

    async fn adjust_model_credits(&self, id: Uuid, delta: i64) -> Result<Option<i64>, AppError> {
        Model::adjust_credits(&self.pool, id, delta).await
    }

    async fn set_model_status(
        &self,
        id: Uuid,
        status: ModelStatus,
    ) -> Result<Option<Model>, AppError> {
        Model::set_status(&self.pool, id, status).await
    }
}

impl CatalogStore for PgStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Product::find_by_id(&self.pool, id).await
    }

    async fn find_assignment(
        &self,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<Option<ModelAssignment>, AppError> {
        ModelAssignment::find_pair(&self.pool, product_id, model_id).await
    }

    async fn insert_assignment(
        &self,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<ModelAssignment, AppError> {
        ModelAssignment::insert(&self.pool, product_id, model_id).await
    }
}
