//! Router assembly and shared request state.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::Caller;
use crate::config::AppConfig;
use crate::database::Store;
use crate::handlers::{data_items, projects, system, users};
use crate::middleware::identity_middleware;
use crate::services::{DataItemService, ProjectService};

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn projects<'a>(&'a self, caller: &'a Caller) -> ProjectService<'a> {
        ProjectService::new(self.store.as_ref(), caller, self.config.api.list_limit)
    }

    pub fn data_items<'a>(&'a self, caller: &'a Caller) -> DataItemService<'a> {
        DataItemService::new(self.store.as_ref(), caller, self.config.api.list_limit)
    }
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Caller-scoped API
        .merge(scoped_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn scoped_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/me", get(users::user_whoami))
        // Collections answer with and without the trailing slash
        .route("/projects", get(projects::project_list).post(projects::project_create))
        .route("/projects/", get(projects::project_list).post(projects::project_create))
        .route(
            "/projects/:project_id",
            get(projects::project_show).patch(projects::project_update),
        )
        .route(
            "/projects/:project_id/data-items",
            get(data_items::data_item_list).post(data_items::data_item_create),
        )
        .route(
            "/projects/:project_id/data-items/",
            get(data_items::data_item_list).post(data_items::data_item_create),
        )
        .route(
            "/projects/:project_id/data-items/:data_item_id",
            get(data_items::data_item_show)
                .patch(data_items::data_item_update)
                .delete(data_items::data_item_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, identity_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
