// handlers/projects/show.rs - GET /projects/:project_id handler

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::Project;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};

pub async fn project_show(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> ApiResult<Project> {
    let project = state.projects(&caller).get(project_id).await?;
    Ok(ApiResponse::success(project))
}
