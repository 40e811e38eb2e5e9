//! Ownership-scoped access to projects and data items.
//!
//! Every operation takes the resolved [`Caller`](crate::auth::Caller)
//! explicitly. A record the caller does not own is reported exactly like a
//! record that does not exist.

pub mod data_items;
pub mod projects;

use thiserror::Error;

use crate::database::models::FieldErrors;
use crate::database::DatabaseError;

pub use data_items::DataItemService;
pub use projects::ProjectService;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Absent, or present but owned by someone else
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
