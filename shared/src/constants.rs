use std::time::Duration;

// JWT Configuration
pub const JWT_ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(15 * 60); // 15 minutes
pub const JWT_REFRESH_TOKEN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days

// Pagination defaults
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

// Username derivation
//
// A derived username is the applicant email's local part; on collision an
// incrementing numeric suffix is appended. The probe loop gives up after
// this many suffixes rather than hammering the datastore.
pub const USERNAME_SUFFIX_LIMIT: u32 = 1000;
pub const USERNAME_FALLBACK_STEM: &str = "model";

// Rate limiting
pub const LOGIN_RATE_LIMIT_PER_MINUTE: u32 = 5;
pub const SIGNUP_RATE_LIMIT_PER_MINUTE: u32 = 10;

// Image slots per product category submission
pub const MAX_IMAGE_URL_LENGTH: usize = 2048;

// Database connection pool
pub const DB_MAX_CONNECTIONS: u32 = 20;
pub const DB_CONNECTION_TIMEOUT_SECONDS: u64 = 30;

// Validation patterns
pub const USERNAME_PATTERN: &str = r"^[a-z0-9][a-z0-9._-]{0,49}$";

// Success messages
pub const SUCCESS_USER_CREATED: &str = "Account registered successfully";
pub const SUCCESS_LOGIN: &str = "Login successful";
pub const SUCCESS_LOGOUT: &str = "Logout successful";
pub const SUCCESS_APPLICATION_SUBMITTED: &str = "Application submitted for review";
pub const SUCCESS_REQUEST_APPROVED: &str = "Request approved";
pub const SUCCESS_REQUEST_REJECTED: &str = "Request rejected";

// Error messages
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const ERROR_DUPLICATE_APPLICANT: &str = "An application with this email already exists";
pub const ERROR_EMAIL_ALREADY_EXISTS: &str = "Email address is already registered";
pub const ERROR_USERNAME_ALREADY_EXISTS: &str = "Username is already taken";
pub const ERROR_REQUEST_NOT_PENDING: &str = "Request has already been decided";
pub const ERROR_ALREADY_ASSIGNED: &str = "Model is already assigned to this product";
pub const ERROR_USERNAME_EXHAUSTED: &str = "Could not derive a unique username";
