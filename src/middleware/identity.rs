use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::auth::{resolve_caller, token_from_headers};
use crate::error::ApiError;

/// Resolves the caller from the identity header and injects it into the
/// request as a [`Caller`](crate::auth::Caller) extension.
///
/// First sight of a token creates its user. Handlers read the caller with
/// `Extension<Caller>` instead of any ambient state.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_headers(request.headers(), &state.config.identity).map_err(|e| {
        tracing::warn!("Rejected identity header: {}", e);
        ApiError::bad_request(e.to_string())
    })?;

    let caller = resolve_caller(state.store.as_ref(), &token).await?;
    tracing::debug!("Resolved caller as user {}", caller.user_id());

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
