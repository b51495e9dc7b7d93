//! In-memory store used by the service unit tests. Mirrors the Postgres
//! semantics that matter to the lifecycle: unique keys reject duplicates,
//! decisions are conditional on the pending status, and paired writes
//! happen under one lock.

use crate::error::AppError;
use crate::models::{
    Model, ModelAssignment, ModelRequest, NewModel, NewModelRequest, NewProduct,
    NewProductRequest, Product, ProductRequest, User,
};
use crate::repositories::{ApplicationStore, CatalogStore, PaginationParams, RosterStore};
use chrono::Utc;
use runway_platform_shared::{AssignmentStatus, ModelStatus, RequestStatus, UserRole};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct State {
    model_requests: HashMap<Uuid, ModelRequest>,
    models: HashMap<Uuid, Model>,
    product_requests: HashMap<Uuid, ProductRequest>,
    products: HashMap<Uuid, Product>,
    assignments: HashMap<Uuid, ModelAssignment>,
    users: HashMap<Uuid, User>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, email: &str, username: &str, role: UserRole) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role,
            full_name: None,
            avatar_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .users
            .insert(user.id, user.clone());
        user
    }

    pub fn seed_model(&self, new: NewModel) -> Model {
        let model = materialize_model(&new);
        self.state
            .lock()
            .unwrap()
            .models
            .insert(model.id, model.clone());
        model
    }

    pub fn seed_product(&self, new: NewProduct) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            owner_id: new.owner_id,
            status: new.status,
            name: new.name,
            description: new.description,
            category: new.category,
            front_image_url: new.front_image_url,
            back_image_url: new.back_image_url,
            detail_image_url: new.detail_image_url,
            assigned_model: new.assigned_model,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .products
            .insert(product.id, product.clone());
        product
    }

    pub fn model_count(&self) -> usize {
        self.state.lock().unwrap().models.len()
    }

    pub fn model_request_count(&self) -> usize {
        self.state.lock().unwrap().model_requests.len()
    }

    pub fn product_request_count(&self) -> usize {
        self.state.lock().unwrap().product_requests.len()
    }
}

fn materialize_model(new: &NewModel) -> Model {
    let now = Utc::now();
    Model {
        id: Uuid::new_v4(),
        status: new.status,
        full_name: new.full_name.clone(),
        email: new.email.clone(),
        username: new.username.clone(),
        password_hash: new.password_hash.clone(),
        avatar_url: new.avatar_url.clone(),
        credits: new.credits,
        height_cm: new.height_cm,
        experience_years: new.experience_years,
        categories: new.categories.clone(),
        bio: new.bio.clone(),
        created_at: now,
        updated_at: now,
    }
}

impl ApplicationStore for MemoryStore {
    async fn find_model_request(&self, id: Uuid) -> Result<Option<ModelRequest>, AppError> {
        Ok(self.state.lock().unwrap().model_requests.get(&id).cloned())
    }

    async fn model_applicant_exists(&self, email: &str) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.models.values().any(|m| m.email == email)
            || state.model_requests.values().any(|r| r.email == email))
    }

    async fn insert_model_application(
        &self,
        request: NewModelRequest,
        shadow: NewModel,
    ) -> Result<(ModelRequest, Model), AppError> {
        let mut state = self.state.lock().unwrap();
        if state.models.values().any(|m| m.email == shadow.email) {
            return Err(AppError::DuplicateKey("models_email_key".to_string()));
        }
        let now = Utc::now();
        let request = ModelRequest {
            id: Uuid::new_v4(),
            status: RequestStatus::Pending,
            full_name: request.full_name,
            email: request.email,
            avatar_url: request.avatar_url,
            credits: 0,
            bio: request.bio,
            instagram_handle: request.instagram_handle,
            website_url: request.website_url,
            age: request.age,
            gender: request.gender,
            height_cm: request.height_cm,
            experience_years: request.experience_years,
            admin_notes: None,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            created_at: now,
            updated_at: now,
        };
        let model = materialize_model(&shadow);
        state.model_requests.insert(request.id, request.clone());
        state.models.insert(model.id, model.clone());
        Ok((request, model))
    }

    async fn list_model_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ModelRequest>, AppError> {
        let state = self.state.lock().unwrap();
        let mut requests: Vec<ModelRequest> = state
            .model_requests
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn approve_model_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
        model: NewModel,
    ) -> Result<Option<(ModelRequest, Model)>, AppError> {
        let mut state = self.state.lock().unwrap();

        match state.model_requests.get(&id) {
            Some(request) if request.status.can_transition_to(RequestStatus::Approved) => {}
            _ => return Ok(None),
        }

        if let Some(username) = model.username.as_deref() {
            let taken = state
                .models
                .values()
                .any(|m| m.email != model.email && m.username.as_deref() == Some(username));
            if taken {
                return Err(AppError::DuplicateKey("models_username_key".to_string()));
            }
        }

        let now = Utc::now();
        let promoted = match state.models.values().find(|m| m.email == model.email) {
            Some(existing) => {
                let mut updated = existing.clone();
                updated.status = model.status;
                updated.full_name = model.full_name.clone();
                updated.username = model.username.clone();
                updated.avatar_url = model.avatar_url.clone();
                updated.credits = model.credits;
                updated.height_cm = model.height_cm;
                updated.experience_years = model.experience_years;
                updated.categories = model.categories.clone();
                updated.bio = model.bio.clone();
                updated.updated_at = now;
                updated
            }
            None => materialize_model(&model),
        };
        state.models.insert(promoted.id, promoted.clone());

        let request = state.model_requests.get_mut(&id).unwrap();
        request.status = RequestStatus::Approved;
        request.approved_by = Some(admin_id);
        request.approved_at = Some(now);
        if notes.is_some() {
            request.admin_notes = notes;
        }
        request.updated_at = now;

        Ok(Some((request.clone(), promoted)))
    }

    async fn reject_model_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<ModelRequest>, AppError> {
        let mut state = self.state.lock().unwrap();
        let request = match state.model_requests.get_mut(&id) {
            Some(request) if request.status.can_transition_to(RequestStatus::Rejected) => request,
            _ => return Ok(None),
        };
        let now = Utc::now();
        request.status = RequestStatus::Rejected;
        request.rejected_by = Some(admin_id);
        request.rejected_at = Some(now);
        request.rejection_reason = reason;
        if notes.is_some() {
            request.admin_notes = notes;
        }
        request.updated_at = now;
        Ok(Some(request.clone()))
    }

    async fn update_model_request_notes(
        &self,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<ModelRequest>, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.model_requests.get_mut(&id).map(|request| {
            request.admin_notes = Some(notes.to_string());
            request.updated_at = Utc::now();
            request.clone()
        }))
    }

    async fn find_product_request(&self, id: Uuid) -> Result<Option<ProductRequest>, AppError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .product_requests
            .get(&id)
            .cloned())
    }

    async fn product_applicant_exists(
        &self,
        email: &str,
        product_name: &str,
    ) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        let in_requests = state
            .product_requests
            .values()
            .any(|r| r.email == email && r.product_name == product_name);
        let in_catalog = state.products.values().any(|p| {
            p.name == product_name
                && p.owner_id
                    .and_then(|owner| state.users.get(&owner))
                    .map_or(false, |u| u.email == email)
        });
        Ok(in_requests || in_catalog)
    }

    async fn insert_product_request(
        &self,
        request: NewProductRequest,
    ) -> Result<ProductRequest, AppError> {
        let now = Utc::now();
        let request = ProductRequest {
            id: Uuid::new_v4(),
            status: RequestStatus::Pending,
            product_name: request.product_name,
            description: request.description,
            category: request.category,
            full_name: request.full_name,
            email: request.email,
            front_image_url: request.front_image_url,
            back_image_url: request.back_image_url,
            detail_image_url: request.detail_image_url,
            requested_model: request.requested_model,
            admin_notes: None,
            rejection_reason: None,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .product_requests
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn list_product_requests(
        &self,
        status: Option<RequestStatus>,
        pagination: &PaginationParams,
    ) -> Result<Vec<ProductRequest>, AppError> {
        let state = self.state.lock().unwrap();
        let mut requests: Vec<ProductRequest> = state
            .product_requests
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect())
    }

    async fn approve_product_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        notes: Option<String>,
        product: NewProduct,
    ) -> Result<Option<(ProductRequest, Product)>, AppError> {
        let mut state = self.state.lock().unwrap();

        match state.product_requests.get(&id) {
            Some(request) if request.status.can_transition_to(RequestStatus::Approved) => {}
            _ => return Ok(None),
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            owner_id: product.owner_id,
            status: product.status,
            name: product.name,
            description: product.description,
            category: product.category,
            front_image_url: product.front_image_url,
            back_image_url: product.back_image_url,
            detail_image_url: product.detail_image_url,
            assigned_model: product.assigned_model,
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id, product.clone());

        let request = state.product_requests.get_mut(&id).unwrap();
        request.status = RequestStatus::Approved;
        request.approved_by = Some(admin_id);
        request.approved_at = Some(now);
        if notes.is_some() {
            request.admin_notes = notes;
        }
        request.updated_at = now;

        Ok(Some((request.clone(), product)))
    }

    async fn reject_product_request(
        &self,
        id: Uuid,
        admin_id: Uuid,
        reason: Option<String>,
        notes: Option<String>,
    ) -> Result<Option<ProductRequest>, AppError> {
        let mut state = self.state.lock().unwrap();
        let request = match state.product_requests.get_mut(&id) {
            Some(request) if request.status.can_transition_to(RequestStatus::Rejected) => request,
            _ => return Ok(None),
        };
        let now = Utc::now();
        request.status = RequestStatus::Rejected;
        request.rejected_by = Some(admin_id);
        request.rejected_at = Some(now);
        request.rejection_reason = reason;
        if notes.is_some() {
            request.admin_notes = notes;
        }
        request.updated_at = now;
        Ok(Some(request.clone()))
    }

    async fn update_product_request_notes(
        &self,
        id: Uuid,
        notes: &str,
    ) -> Result<Option<ProductRequest>, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.product_requests.get_mut(&id).map(|request| {
            request.admin_notes = Some(notes.to_string());
            request.updated_at = Utc::now();
            request.clone()
        }))
    }

    async fn find_owner_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

impl RosterStore for MemoryStore {
    async fn find_model(&self, id: Uuid) -> Result<Option<Model>, AppError> {
        Ok(self.state.lock().unwrap().models.get(&id).cloned())
    }

    async fn find_model_by_email(&self, email: &str) -> Result<Option<Model>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state.models.values().find(|m| m.email == email).cloned())
    }

    async fn model_username_exists(&self, username: &str) -> Result<bool, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .models
            .values()
            .any(|m| m.username.as_deref() == Some(username)))
    }

    async fn adjust_model_credits(&self, id: Uuid, delta: i64) -> Result<Option<i64>, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.models.get_mut(&id).map(|model| {
            model.credits = (model.credits + delta).max(0);
            model.updated_at = Utc::now();
            model.credits
        }))
    }

    async fn set_model_status(
        &self,
        id: Uuid,
        status: ModelStatus,
    ) -> Result<Option<Model>, AppError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.models.get_mut(&id).map(|model| {
            model.status = status;
            model.updated_at = Utc::now();
            model.clone()
        }))
    }
}

impl CatalogStore for MemoryStore {
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.state.lock().unwrap().products.get(&id).cloned())
    }

    async fn find_assignment(
        &self,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<Option<ModelAssignment>, AppError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .assignments
            .values()
            .find(|a| a.product_id == product_id && a.model_id == model_id)
            .cloned())
    }

    async fn insert_assignment(
        &self,
        product_id: Uuid,
        model_id: Uuid,
    ) -> Result<ModelAssignment, AppError> {
        let mut state = self.state.lock().unwrap();
        let duplicate = state
            .assignments
            .values()
            .any(|a| a.product_id == product_id && a.model_id == model_id);
        if duplicate {
            return Err(AppError::DuplicateKey(
                "model_assignments_product_id_model_id_key".to_string(),
            ));
        }
        let assignment = ModelAssignment {
            id: Uuid::new_v4(),
            product_id,
            model_id,
            status: AssignmentStatus::Pending,
            created_at: Utc::now(),
        };
        state.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }
}
