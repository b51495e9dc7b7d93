use crate::error::AppError;
use crate::models::ModelAssignment;
use crate::repositories::{CatalogStore, RosterStore};
use crate::services::revalidation::Revalidator;
use runway_platform_shared::{ModelStatus, ERROR_ALREADY_ASSIGNED};
use tracing::info;
use uuid::Uuid;


/// Links a model to a product on behalf of the product's owner.
#[derive(Clone)]
pub struct AssignmentService<S> {
    store: S,
    revalidator: Revalidator,
}

impl<S> AssignmentService<S>
where
    S: CatalogStore + RosterStore,
{
    pub fn new(store: S, revalidator: Revalidator) -> Self {
        Self { store, revalidator }
    }

    pub async fn get_product(&self, product_id: Uuid) -> Result<crate::models::Product, AppError> {
        self.store
            .find_product(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }

    pub async fn assign_model(
        &self,
        product_id: Uuid,
        model_id: Uuid,
        caller_id: Uuid,
    ) -> Result<ModelAssignment, AppError> {
        let product = self
            .store
            .find_product(product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if product.owner_id != Some(caller_id) {
            return Err(AppError::Forbidden(
                "Only the product owner can assign models".to_string(),
            ));
        }

        let model = self
            .store
            .find_model(model_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Model not found".to_string()))?;
        if model.status != ModelStatus::Active {
            return Err(AppError::InvalidState(
                "Model is not active on the roster".to_string(),
            ));
        }

        if self
            .store
            .find_assignment(product_id, model_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(ERROR_ALREADY_ASSIGNED.to_string()));
        }

        let assignment = self.store.insert_assignment(product_id, model_id).await?;

        info!(%product_id, %model_id, assignment_id = %assignment.id, "model assigned to product");
        self.revalidator
            .notify(&[&format!("/products/{product_id}")]);

        Ok(assignment)
    }
}
