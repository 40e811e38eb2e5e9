use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the API error body.
///
/// Shape errors (unknown content block type, missing payload, wrong field
/// type) become 422 before the handler runs, so nothing is persisted.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let mut field_errors = HashMap::new();
                field_errors.insert("body".to_string(), err.body_text());
                ApiError::unprocessable_entity("Request body failed validation", field_errors)
            }
            JsonRejection::JsonSyntaxError(err) => ApiError::invalid_json(err.body_text()),
            other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                ApiError::payload_too_large(other.body_text())
            }
            other => ApiError::bad_request(other.body_text()),
        }
    }
}

/// Path extractor; an unparsable id is a 422 like any other malformed input
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        let mut field_errors = HashMap::new();
        field_errors.insert("path".to_string(), rejection.body_text());
        ApiError::unprocessable_entity("Invalid path parameter", field_errors)
    }
}
