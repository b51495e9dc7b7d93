use super::*;
use crate::repositories::memory::MemoryStore;
use crate::utils::crypto::verify_password;
use runway_platform_shared::RequestStatus;

fn application(email: &str) -> ModelApplicationRequest {
    ModelApplicationRequest {
        full_name: "Jane Doe".to_string(),
        email: email.to_string(),
        password: "a-strong-password".to_string(),
        avatar_url: None,
        bio: None,
        instagram_handle: Some("@janedoe".to_string()),
        website_url: None,
        age: Some(24),
        gender: None,
        height_cm: Some(175),
        experience_years: Some(2),
    }
}

fn product_application(email: &str, name: &str) -> ProductApplicationRequest {
    ProductApplicationRequest {
        product_name: name.to_string(),
        description: None,
        category: "apparel".to_string(),
        full_name: "Jane Client".to_string(),
        email: email.to_string(),
        front_image_url: None,
        back_image_url: None,
        detail_image_url: None,
        requested_model: None,
    }
}

#[tokio::test]
async fn test_model_signup_creates_request_and_shadow() {
    let store = MemoryStore::new();
    let svc = IntakeService::new(store.clone());

    let (request, shadow) = svc
        .model_signup(application("jane@studio.com"))
        .await
        .unwrap();

    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.email, "jane@studio.com");
    assert_eq!(request.credits, 0);

    assert_eq!(shadow.status, ModelStatus::Pending);
    assert_eq!(shadow.email, "jane@studio.com");
    assert!(shadow.username.is_none());
    // The shadow credential lets the applicant log in right away.
    assert!(verify_password("a-strong-password", &shadow.password_hash).unwrap());

    assert_eq!(store.model_request_count(), 1);
    assert_eq!(store.model_count(), 1);
}

#[tokio::test]
async fn test_duplicate_model_signup_is_rejected() {
    let store = MemoryStore::new();
    let svc = IntakeService::new(store.clone());

    svc.model_signup(application("jane@studio.com"))
        .await
        .unwrap();

    let second = svc.model_signup(application("jane@studio.com")).await;
    assert!(matches!(second, Err(AppError::DuplicateKey(_))));

    // The failed attempt must leave no partial records behind.
    assert_eq!(store.model_request_count(), 1);
    assert_eq!(store.model_count(), 1);
}

#[tokio::test]
async fn test_product_application_dedupes_by_email_and_name() {
    let store = MemoryStore::new();
    let svc = IntakeService::new(store.clone());

    let request = svc
        .product_application(product_application("client@brand.com", "Linen Jacket"))
        .await
        .unwrap();
    assert_eq!(request.status, RequestStatus::Pending);

    let duplicate = svc
        .product_application(product_application("client@brand.com", "Linen Jacket"))
        .await;
    assert!(matches!(duplicate, Err(AppError::DuplicateKey(_))));

    // Same applicant, different product is fine.
    svc.product_application(product_application("client@brand.com", "Silk Scarf"))
        .await
        .unwrap();

    assert_eq!(store.product_request_count(), 2);
}
