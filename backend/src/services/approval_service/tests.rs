use super::*;
use crate::models::{NewModelRequest, NewProductRequest};
use crate::repositories::memory::MemoryStore;
use runway_platform_shared::UserRole;

fn service(store: MemoryStore) -> ApprovalService<MemoryStore> {
    ApprovalService::new(store, Revalidator::disabled())
}

async fn submit_application(store: &MemoryStore, full_name: &str, email: &str) -> ModelRequest {
    let request = NewModelRequest {
        full_name: full_name.to_string(),
        email: email.to_string(),
        avatar_url: None,
        bio: Some("test bio".to_string()),
        instagram_handle: None,
        website_url: None,
        age: Some(24),
        gender: None,
        height_cm: Some(175),
        experience_years: Some(2),
    };
    let shadow = NewModel {
        status: ModelStatus::Pending,
        full_name: full_name.to_string(),
        email: email.to_string(),
        username: None,
        password_hash: "$2b$12$shadow-credential-hash".to_string(),
        avatar_url: None,
        credits: 0,
        height_cm: Some(175),
        experience_years: Some(2),
        categories: Vec::new(),
        bio: Some("test bio".to_string()),
    };
    let (request, _) = store.insert_model_application(request, shadow).await.unwrap();
    request
}

async fn submit_product_application(
    store: &MemoryStore,
    product_name: &str,
    email: &str,
    requested_model: Option<Uuid>,
) -> ProductRequest {
    store
        .insert_product_request(NewProductRequest {
            product_name: product_name.to_string(),
            description: Some("a product".to_string()),
            category: "apparel".to_string(),
            full_name: "Jane Client".to_string(),
            email: email.to_string(),
            front_image_url: None,
            back_image_url: None,
            detail_image_url: None,
            requested_model,
        })
        .await
        .unwrap()
}

fn active_model(email: &str, username: &str) -> NewModel {
    NewModel {
        status: ModelStatus::Active,
        full_name: "Seeded Model".to_string(),
        email: email.to_string(),
        username: Some(username.to_string()),
        password_hash: "$2b$12$seeded-credential-hash".to_string(),
        avatar_url: None,
        credits: 0,
        height_cm: None,
        experience_years: None,
        categories: Vec::new(),
        bio: None,
    }
}

#[tokio::test]
async fn test_approve_promotes_shadow_and_derives_username() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();
    let request = submit_application(&store, "Jane Doe", "jane@studio.com").await;

    let (approved, model) = svc
        .approve_model_request(request.id, admin_id, Some("great portfolio".to_string()))
        .await
        .unwrap();

    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(approved.approved_by, Some(admin_id));
    assert!(approved.approved_at.is_some());
    assert_eq!(approved.admin_notes.as_deref(), Some("great portfolio"));

    assert_eq!(model.status, ModelStatus::Active);
    assert_eq!(model.username.as_deref(), Some("jane"));
    assert_eq!(model.credits, 0);
    assert_eq!(model.email, "jane@studio.com");
    // The shadow row is promoted, not duplicated, and keeps its credential.
    assert_eq!(store.model_count(), 1);
    assert_eq!(model.password_hash, "$2b$12$shadow-credential-hash");
}

#[tokio::test]
async fn test_sequential_approvals_suffix_username() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();

    let first = submit_application(&store, "A One", "a@x.com").await;
    let second = submit_application(&store, "A Two", "a@y.com").await;

    let (_, model_a) = svc
        .approve_model_request(first.id, admin_id, None)
        .await
        .unwrap();
    let (_, model_a1) = svc
        .approve_model_request(second.id, admin_id, None)
        .await
        .unwrap();

    assert_eq!(model_a.username.as_deref(), Some("a"));
    assert_eq!(model_a1.username.as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_second_decision_is_rejected() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();
    let request = submit_application(&store, "Jane Doe", "jane@studio.com").await;

    svc.approve_model_request(request.id, admin_id, None)
        .await
        .unwrap();

    let again = svc.approve_model_request(request.id, admin_id, None).await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));

    let reject = svc
        .reject_model_request(request.id, admin_id, Some("nope".to_string()), None)
        .await;
    assert!(matches!(reject, Err(AppError::InvalidState(_))));

    // The decided record is untouched and no duplicate entity appeared.
    let stored = svc.get_model_request(request.id).await.unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
    assert!(stored.rejection_reason.is_none());
    assert_eq!(store.model_count(), 1);
}

#[tokio::test]
async fn test_reject_records_reason_and_is_terminal() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();
    let request = submit_application(&store, "Jane Doe", "jane@studio.com").await;

    let rejected = svc
        .reject_model_request(
            request.id,
            admin_id,
            Some("incomplete portfolio".to_string()),
            Some("resubmit with photos".to_string()),
        )
        .await
        .unwrap();

    assert_eq!(rejected.status, RequestStatus::Rejected);
    assert_eq!(rejected.rejected_by, Some(admin_id));
    assert!(rejected.rejected_at.is_some());
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("incomplete portfolio")
    );

    let approve = svc.approve_model_request(request.id, admin_id, None).await;
    assert!(matches!(approve, Err(AppError::InvalidState(_))));

    // The shadow row stays pending; rejection creates nothing.
    let shadow = store
        .find_model_by_email("jane@studio.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shadow.status, ModelStatus::Pending);
    assert_eq!(store.model_count(), 1);
}

#[tokio::test]
async fn test_concurrent_approvals_create_exactly_one_model() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();
    let request = submit_application(&store, "Jane Doe", "jane@studio.com").await;

    let (first, second) = tokio::join!(
        svc.approve_model_request(request.id, admin_id, None),
        svc.approve_model_request(request.id, admin_id, None),
    );

    assert_eq!(
        first.is_ok() as u8 + second.is_ok() as u8,
        1,
        "exactly one concurrent approval may win"
    );
    assert_eq!(store.model_count(), 1);
}

#[tokio::test]
async fn test_username_space_exhausted() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();

    store.seed_model(active_model("jane@elsewhere.com", "jane"));
    for suffix in 1..=USERNAME_SUFFIX_LIMIT {
        store.seed_model(active_model(
            &format!("jane{suffix}@elsewhere.com"),
            &format!("jane{suffix}"),
        ));
    }

    let request = submit_application(&store, "Jane Doe", "jane@studio.com").await;
    let result = svc.approve_model_request(request.id, admin_id, None).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_missing_request_is_not_found() {
    let store = MemoryStore::new();
    let svc = service(store);

    let result = svc
        .approve_model_request(Uuid::new_v4(), Uuid::new_v4(), None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_notes_stay_editable_after_decision() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();
    let request = submit_application(&store, "Jane Doe", "jane@studio.com").await;

    svc.approve_model_request(request.id, admin_id, None)
        .await
        .unwrap();

    let updated = svc
        .edit_model_request_notes(request.id, "followed up by email")
        .await
        .unwrap();
    assert_eq!(updated.admin_notes.as_deref(), Some("followed up by email"));
    assert_eq!(updated.status, RequestStatus::Approved);
}

#[tokio::test]
async fn test_approve_product_resolves_owner_by_email() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let admin_id = Uuid::new_v4();
    let owner = store.seed_user("client@brand.com", "brand", UserRole::Client);
    let request = submit_product_application(&store, "Linen Jacket", "client@brand.com", None).await;

    let (approved, product) = svc
        .approve_product_request(request.id, admin_id, None)
        .await
        .unwrap();

    assert_eq!(approved.status, RequestStatus::Approved);
    assert_eq!(product.owner_id, Some(owner.id));
    assert_eq!(product.status, ProductStatus::Active);
    assert_eq!(product.name, "Linen Jacket");

    let again = svc.approve_product_request(request.id, admin_id, None).await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));
}

#[tokio::test]
async fn test_approve_product_keeps_known_requested_model() {
    let store = MemoryStore::new();
    let svc = service(store.clone());
    let model = store.seed_model(active_model("mia@studio.com", "mia"));

    let request =
        submit_product_application(&store, "Silk Scarf", "client@brand.com", Some(model.id)).await;
    let (_, product) = svc
        .approve_product_request(request.id, Uuid::new_v4(), None)
        .await
        .unwrap();
    assert_eq!(product.assigned_model, Some(model.id));
}

#[tokio::test]
async fn test_approve_product_drops_unknown_requested_model() {
    let store = MemoryStore::new();
    let svc = service(store.clone());

    let request = submit_product_application(
        &store,
        "Silk Scarf",
        "client@brand.com",
        Some(Uuid::new_v4()),
    )
    .await;
    let (_, product) = svc
        .approve_product_request(request.id, Uuid::new_v4(), None)
        .await
        .unwrap();
    assert_eq!(product.assigned_model, None);
}

#[test]
fn test_username_stem() {
    assert_eq!(username_stem("jane@studio.com"), "jane");
    assert_eq!(username_stem("Jane.Doe+tag@studio.com"), "jane.doetag");
    assert_eq!(username_stem("__@studio.com"), "model");
    assert_eq!(username_stem(""), "model");
}
