use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A caller as known to this service. Created the first time a request carries
/// a new external identity token; never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub external_id: String,
}
