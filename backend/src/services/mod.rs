pub mod approval_service;
pub mod assignment_service;
pub mod auth_service;
pub mod campaign_service;
pub mod credit_service;
pub mod intake_service;
pub mod revalidation;

pub use approval_service::ApprovalService;
pub use assignment_service::AssignmentService;
pub use auth_service::AuthService;
pub use campaign_service::CampaignService;
pub use credit_service::CreditService;
pub use intake_service::IntakeService;
pub use revalidation::Revalidator;

use crate::repositories::PgStore;

// Concrete aliases wired against the Postgres store; handlers receive
// these through web::Data.
pub type AppApprovalService = ApprovalService<PgStore>;
pub type AppAssignmentService = AssignmentService<PgStore>;
pub type AppCreditService = CreditService<PgStore>;
pub type AppIntakeService = IntakeService<PgStore>;
