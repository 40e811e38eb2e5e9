// handlers/users/whoami.rs - GET /users/me handler

use axum::extract::Extension;

use crate::auth::Caller;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};

/// The user the identity header resolved to. Like every scoped route, the
/// first call with a new token registers that user.
pub async fn user_whoami(Extension(caller): Extension<Caller>) -> ApiResult<User> {
    Ok(ApiResponse::success(caller.user))
}
