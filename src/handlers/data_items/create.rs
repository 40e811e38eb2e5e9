// handlers/data_items/create.rs - POST /projects/:project_id/data-items/ handler

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::{CreateDataItem, DataItem};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};

/// Record a new data item under one of the caller's projects.
///
/// Expected Input:
/// ```json
/// {
///   "input_message": [{"type": "text", "content": "Hello"}],
///   "output_message": [{"type": "image", "content": "https://..."}]
/// }
/// ```
/// `output_message` is optional. A block with an unknown `type` or without
/// its `content` is rejected with 422 and nothing is stored.
pub async fn data_item_create(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(project_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateDataItem>,
) -> ApiResult<DataItem> {
    let item = state.data_items(&caller).create(project_id, &request).await?;
    Ok(ApiResponse::success(item))
}
