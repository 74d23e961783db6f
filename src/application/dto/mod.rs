pub mod auth;
pub mod response;

pub use auth::AuthTokens;
pub use response::{ApiErrorResponse, ApiSuccessResponse};
