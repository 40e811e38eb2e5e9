pub mod extract;
pub mod identity;
pub mod response;

pub use extract::{ApiJson, ApiPath};
pub use identity::identity_middleware;
pub use response::{ApiResponse, ApiResult};
