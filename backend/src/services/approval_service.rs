use crate::error::AppError;
use crate::models::{Model, ModelRequest, NewModel, NewProduct, Product, ProductRequest};
use crate::repositories::{ApplicationStore, PaginationParams, RosterStore};
use crate::services::revalidation::Revalidator;
use runway_platform_shared::{
    ModelStatus, ProductStatus, RequestStatus, ERROR_REQUEST_NOT_PENDING,
    ERROR_USERNAME_EXHAUSTED, USERNAME_FALLBACK_STEM, USERNAME_SUFFIX_LIMIT,
};
use tracing::{info, warn};
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// The admin decision state machine.
///
/// A request moves pending -> approved or pending -> rejected exactly
/// once; approval additionally materializes the canonical entity. The
/// store performs the transition as an atomic conditional update, so a
/// decision that lost a race reports InvalidState instead of applying
/// twice.
#[derive(Clone)]
pub struct ApprovalService<S> {
    store: S,
    revalidator: Revalidator,
}

impl<S> ApprovalService<S>
where
    S: ApplicationStore + RosterStore,
{
    pub fn new(store: S, revalidator: Revalidator) -> Self {
        Self { store, revalidator }
    }

    pub async fn get_model_request(&self, request_id: Uuid) -> Result<ModelRequest, AppError> {
        self.store
            .find_model_request(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Model request not found".to_string()))
    }

    pub async fn list_model_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ModelRequest>, AppError> {
        self.store.list_model_requests(status, pagination).await
    }

    pub async fn approve_model_request(
        &self,
        request_id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
    ) -> Result<(ModelRequest, Model), AppError> {
        let request = self.get_model_request(request_id).await?;
        if request.status.is_decided() {
            return Err(AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()));
        }

        let username = self.derive_username(&request.email).await?;
        let model = NewModel {
            status: ModelStatus::Active,
            full_name: request.full_name.clone(),
            email: request.email.clone(),
            username: Some(username),
            // The shadow row's credential survives promotion; this value
            // is only used when no shadow exists.
            password_hash: String::new(),
            avatar_url: request.avatar_url.clone(),
            credits: request.credits,
            height_cm: request.height_cm,
            experience_years: request.experience_years,
            categories: Vec::new(),
            bio: request.bio.clone(),
        };

        let (request, model) = self
            .store
            .approve_model_request(request_id, admin_id, notes, model)
            .await?
            .ok_or_else(|| AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()))?;

        info!(
            request_id = %request.id,
            model_id = %model.id,
            username = model.username.as_deref().unwrap_or_default(),
            %admin_id,
            "model request approved"
        );
        self.revalidator.notify(&["/admin/model-requests", "/models"]);

        Ok((request, model))
    }

    pub async fn reject_model_request(
        &self,
        request_id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<ModelRequest, AppError> {
        let request = self.get_model_request(request_id).await?;
        if request.status.is_decided() {
            return Err(AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()));
        }

        let request = self
            .store
            .reject_model_request(request_id, admin_id, reason, notes)
            .await?
            .ok_or_else(|| AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()))?;

        info!(request_id = %request.id, %admin_id, "model request rejected");
        self.revalidator.notify(&["/admin/model-requests"]);

        Ok(request)
    }

    /// Notes remain editable after a decision; nothing else does.
    pub async fn edit_model_request_notes(
        &self,
        request_id: Uuid,
        notes: &str,
    ) -> Result<ModelRequest, AppError> {
        self.store
            .update_model_request_notes(request_id, notes)
            .await?
            .ok_or_else(|| AppError::NotFound("Model request not found".to_string()))
    }

    pub async fn get_product_request(&self, request_id: Uuid) -> Result<ProductRequest, AppError> {
        self.store
            .find_product_request(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product request not found".to_string()))
    }

    pub async fn list_product_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ProductRequest>, AppError> {
        self.store.list_product_requests(status, pagination).await
    }

    pub async fn approve_product_request(
        &self,
        request_id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
    ) -> Result<(ProductRequest, Product), AppError> {
        let request = self.get_product_request(request_id).await?;
        if request.status.is_decided() {
            return Err(AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()));
        }

        // The request and catalog entry are linked only by the applicant
        // email; resolve it to an owning account when one exists.
        let owner = self.store.find_owner_by_email(&request.email).await?;

        let assigned_model = match request.requested_model {
            Some(model_id) => match self.store.find_model(model_id).await? {
                Some(model) => Some(model.id),
                None => {
                    warn!(request_id = %request.id, %model_id, "requested model no longer exists");
                    None
                }
            },
            None => None,
        };

        let product = NewProduct {
            owner_id: owner.map(|u| u.id),
            status: ProductStatus::Active,
            name: request.product_name.clone(),
            description: request.description.clone(),
            category: request.category.clone(),
            front_image_url: request.front_image_url.clone(),
            back_image_url: request.back_image_url.clone(),
            detail_image_url: request.detail_image_url.clone(),
            assigned_model,
        };

        let (request, product) = self
            .store
            .approve_product_request(request_id, admin_id, notes, product)
            .await?
            .ok_or_else(|| AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()))?;

        info!(
            request_id = %request.id,
            product_id = %product.id,
            %admin_id,
            "product request approved"
        );
        self.revalidator
            .notify(&["/admin/product-requests", "/products"]);

        Ok((request, product))
    }

    pub async fn reject_product_request(
        &self,
        request_id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<ProductRequest, AppError> {
        let request = self.get_product_request(request_id).await?;
        if request.status.is_decided() {
            return Err(AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()));
        }

        let request = self
            .store
            .reject_product_request(request_id, admin_id, reason, notes)
            .await?
            .ok_or_else(|| AppError::InvalidState(ERROR_REQUEST_NOT_PENDING.to_string()))?;

        info!(request_id = %request.id, %admin_id, "product request rejected");
        self.revalidator.notify(&["/admin/product-requests"]);

        Ok(request)
    }

    pub async fn edit_product_request_notes(
        &self,
        request_id: Uuid,
        notes: &str,
    ) -> Result<ProductRequest, AppError> {
        self.store
            .update_product_request_notes(request_id, notes)
            .await?
            .ok_or_else(|| AppError::NotFound("Product request not found".to_string()))
    }

    /// Derive a unique username from the email local-part, appending an
    /// incrementing suffix on collision. The probe loop is bounded; a
    /// namespace that dense is a data problem, not a retry problem.
    async fn derive_username(&self, email: &str) -> Result<String, AppError> {
        let stem = username_stem(email);
        if !self.store.model_username_exists(&stem).await? {
            return Ok(stem);
        }
        for suffix in 1..=USERNAME_SUFFIX_LIMIT {
            let candidate = format!("{stem}{suffix}");
            if !self.store.model_username_exists(&candidate).await? {
                return Ok(candidate);
            }
        }
        Err(AppError::Conflict(ERROR_USERNAME_EXHAUSTED.to_string()))
    }
}

/// The username stem is the lowercased email local-part reduced to the
/// characters the username pattern admits.
pub fn username_stem(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let stem: String = local
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .take(32)
        .collect();
    let stem = stem.trim_matches(|c: char| matches!(c, '.' | '_' | '-'));
    if stem.is_empty() {
        USERNAME_FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}
