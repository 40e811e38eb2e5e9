// handlers/data_items/show.rs - GET /projects/:project_id/data-items/:data_item_id handler

use axum::extract::{Extension, State};
use uuid::Uuid;

use crate::api::AppState;
use crate::auth::Caller;
use crate::database::models::DataItem;
use crate::middleware::{ApiPath, ApiResponse, ApiResult};

/// Soft-deleted items are still returned here; only listings hide them.
pub async fn data_item_show(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath((project_id, data_item_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<DataItem> {
    let item = state.data_items(&caller).get(project_id, data_item_id).await?;
    Ok(ApiResponse::success(item))
}
