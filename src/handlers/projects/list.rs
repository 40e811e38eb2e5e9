// handlers/projects/list.rs - GET /projects/ handler

use axum::extract::{Extension, State};

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::Project;
use crate::middleware::{ApiResponse, ApiResult};

/// Active projects owned by the caller, oldest first
pub async fn project_list(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Vec<Project>> {
    let projects = state.projects(&caller).list().await?;
    Ok(ApiResponse::success(projects))
}
