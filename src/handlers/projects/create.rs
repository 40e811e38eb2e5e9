// handlers/projects/create.rs - POST /projects/ handler

use axum::extract::{Extension, State};

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::{CreateProject, Project};
use crate::middleware::{ApiJson, ApiResponse, ApiResult};

/// Create a project owned by the caller.
///
/// Input: `{"name": "string"}` (must not be blank)
pub async fn project_create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiJson(request): ApiJson<CreateProject>,
) -> ApiResult<Project> {
    let project = state.projects(&caller).create(&request).await?;
    Ok(ApiResponse::success(project))
}
