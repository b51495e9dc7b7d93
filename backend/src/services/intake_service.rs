use crate::error::AppError;
use crate::models::{Model, ModelRequest, NewModel, NewModelRequest, NewProductRequest, ProductRequest};
use crate::repositories::ApplicationStore;
use crate::utils::crypto::hash_password;
use crate::utils::validation::validate_email;
use runway_platform_shared::{
    ModelApplicationRequest, ModelStatus, ProductApplicationRequest, ERROR_DUPLICATE_APPLICANT,
};
use tracing::info;

#[cfg(test)]
mod tests;

/// Public intake for model and product applications.
///
/// Model intake also pre-creates a pending shadow roster record holding
/// the hashed credential, so the applicant can authenticate and watch
/// their status while the request sits in the review queue.
#[derive(Clone)]
pub struct IntakeService<S> {
    store: S,
}

impl<S> IntakeService<S>
where
    S: ApplicationStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn model_signup(
        &self,
        application: ModelApplicationRequest,
    ) -> Result<(ModelRequest, Model), AppError> {
        validate_email(&application.email)
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

        if self
            .store
            .model_applicant_exists(&application.email)
            .await?
        {
            return Err(AppError::DuplicateKey(ERROR_DUPLICATE_APPLICANT.to_string()));
        }

        let password_hash = hash_password(&application.password)?;

        let request = NewModelRequest {
            full_name: application.full_name.clone(),
            email: application.email.clone(),
            avatar_url: application.avatar_url.clone(),
            bio: application.bio.clone(),
            instagram_handle: application.instagram_handle.clone(),
            website_url: application.website_url.clone(),
            age: application.age,
            gender: application.gender.clone(),
            height_cm: application.height_cm,
            experience_years: application.experience_years,
        };
        let shadow = NewModel {
            status: ModelStatus::Pending,
            full_name: application.full_name,
            email: application.email,
            username: None,
            password_hash,
            avatar_url: application.avatar_url,
            credits: 0,
            height_cm: application.height_cm,
            experience_years: application.experience_years,
            categories: Vec::new(),
            bio: application.bio,
        };

        let (request, shadow) = self.store.insert_model_application(request, shadow).await?;

        info!(request_id = %request.id, email = %request.email, "model application received");

        Ok((request, shadow))
    }

    pub async fn product_application(
        &self,
        application: ProductApplicationRequest,
    ) -> Result<ProductRequest, AppError> {
        validate_email(&application.email)
            .map_err(|_| AppError::Validation("Invalid email address".to_string()))?;

        if self
            .store
            .product_applicant_exists(&application.email, &application.product_name)
            .await?
        {
            return Err(AppError::DuplicateKey(ERROR_DUPLICATE_APPLICANT.to_string()));
        }

        let request = self
            .store
            .insert_product_request(NewProductRequest {
                product_name: application.product_name,
                description: application.description,
                category: application.category,
                full_name: application.full_name,
                email: application.email,
                front_image_url: application.front_image_url,
                back_image_url: application.back_image_url,
                detail_image_url: application.detail_image_url,
                requested_model: application.requested_model,
            })
            .await?;

        info!(request_id = %request.id, email = %request.email, "product application received");

        Ok(request)
    }
}
