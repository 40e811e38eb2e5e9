// handlers/data_items/list.rs - GET /projects/:project_id/data-items/ handler

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::DataItem;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};

pub async fn data_item_list(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(project_id): ApiPath<Uuid>,
) -> ApiResult<Vec<DataItem>> {
    let items = state.data_items(&caller).list(project_id).await?;
    Ok(ApiResponse::success(items))
}
