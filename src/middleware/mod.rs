pub mod auth;
pub mod response;

pub use auth::{authenticate, CurrentUser};
pub use response::{ApiResponse, ApiResult, Paging};
