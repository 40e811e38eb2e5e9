// handlers/data_items/update.rs - PATCH /projects/:project_id/data-items/:data_item_id handler

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::{DataItem, UpdateDataItem};
use crate::middleware::{ApiJson, ApiPath, ApiResponse, ApiResult};

/// Any subset of `input_message`, `output_message` and `deleted`; fields
/// left out keep their stored values.
pub async fn data_item_update(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath((project_id, data_item_id)): ApiPath<(Uuid, Uuid)>,
    ApiJson(request): ApiJson<UpdateDataItem>,
) -> ApiResult<DataItem> {
    let item = state
        .data_items(&caller)
        .update(project_id, data_item_id, &request)
        .await?;
    Ok(ApiResponse::success(item))
}
