// handlers/data_items/delete.rs - DELETE /projects/:project_id/data-items/:data_item_id handler

use axum::extract::{Extension, State};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};

/// Soft delete: the item drops out of listings but the record is kept.
pub async fn data_item_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath((project_id, data_item_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<Value> {
    let item = state.data_items(&caller).soft_delete(project_id, data_item_id).await?;
    Ok(ApiResponse::success(json!({
        "message": "Data item deleted",
        "id": item.id
    })))
}
