use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Account DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(length(min = 1, max = 120))]
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
    pub expires_in: i64,
}

// Model application DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ModelApplicationRequest {
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8))]
    pub password: String,

    #[validate(length(max = 2048))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 2000))]
    pub bio: Option<String>,

    #[validate(length(max = 100))]
    pub instagram_handle: Option<String>,

    #[validate(length(max = 2048))]
    pub website_url: Option<String>,

    #[validate(range(min = 16, max = 99))]
    pub age: Option<i32>,

    #[validate(length(max = 32))]
    pub gender: Option<String>,

    #[validate(range(min = 100, max = 250))]
    pub height_cm: Option<i32>,

    #[validate(range(min = 0, max = 80))]
    pub experience_years: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelRequestResponse {
    pub id: Uuid,
    pub status: RequestStatus,
    pub full_name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub credits: i64,
    pub bio: Option<String>,
    pub instagram_handle: Option<String>,
    pub website_url: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<i32>,
    pub experience_years: Option<i32>,
    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelResponse {
    pub id: Uuid,
    pub status: ModelStatus,
    pub full_name: String,
    pub email: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub credits: i64,
    pub height_cm: Option<i32>,
    pub experience_years: Option<i32>,
    pub categories: Vec<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Admin decision DTOs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    Approve,
    Reject,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct DecisionRequest {
    pub action: DecisionAction,

    #[validate(length(max = 2000))]
    pub admin_notes: Option<String>,

    #[validate(length(max = 2000))]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct EditNotesRequest {
    #[validate(length(max = 2000))]
    pub admin_notes: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreditAdjustmentRequest {
    /// Signed delta; positive adds credits, negative removes them.
    pub credits: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreditAdjustmentResponse {
    pub credits: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStatusUpdateRequest {
    pub status: ModelStatus,
}

// Product application DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProductApplicationRequest {
    #[validate(length(min = 1, max = 255))]
    pub product_name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub category: String,

    #[validate(length(min = 1, max = 120))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 2048))]
    pub front_image_url: Option<String>,

    #[validate(length(max = 2048))]
    pub back_image_url: Option<String>,

    #[validate(length(max = 2048))]
    pub detail_image_url: Option<String>,

    pub requested_model: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductRequestResponse {
    pub id: Uuid,
    pub status: RequestStatus,
    pub product_name: String,
    pub description: Option<String>,
    pub category: String,
    pub full_name: String,
    pub email: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub detail_image_url: Option<String>,
    pub requested_model: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub owner_id: Option<Uuid>,
    pub status: ProductStatus,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
    pub detail_image_url: Option<String>,
    pub assigned_model: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Assignment DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignModelRequest {
    pub model_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub model_id: Uuid,
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
}

// Campaign DTOs
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignResponse {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: CampaignStatus,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttachProductRequest {
    pub product_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RecordAnalyticsRequest {
    pub day: NaiveDate,

    #[validate(range(min = 0))]
    pub impressions: i64,

    #[validate(range(min = 0))]
    pub engagement: i64,

    #[validate(range(min = 0))]
    pub clicks: i64,

    #[validate(range(min = 0))]
    pub conversions: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignAnalyticsRow {
    pub day: NaiveDate,
    pub impressions: i64,
    pub engagement: i64,
    pub clicks: i64,
    pub conversions: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CampaignAnalyticsSummary {
    pub days: usize,
    pub impressions: i64,
    pub engagement: i64,
    pub clicks: i64,
    pub conversions: i64,
    /// engagement / impressions, zero when there are no impressions
    pub engagement_rate: Decimal,
    pub rows: Vec<CampaignAnalyticsRow>,
}
