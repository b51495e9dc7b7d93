pub mod crypto;
pub mod jwt;
pub mod validation;

pub use jwt::{Claims, JwtService, TokenPair};
pub use validation::validation_errors_to_app_error;
