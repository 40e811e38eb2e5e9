// handlers/projects/update.rs - PATCH /projects/:project_id handler

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::{Project, UpdateProject};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};

/// Partial update of name and/or the soft-delete flag.
///
/// Input: `{"name"?: "string", "deleted"?: bool}`. Responds 404 with
/// `{"detail": "Project not found"}` when the project is missing or belongs
/// to someone else.
pub async fn project_update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateProject>,
) -> ApiResult<Project> {
    let project = state.projects(&caller).update(project_id, &request).await?;
    Ok(ApiResponse::success(project))
}
