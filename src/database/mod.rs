pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;
pub mod store;
pub mod testing;

use std::sync::Arc;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::Store;

use crate::config::AppConfig;

/// Pick the backing store for this process.
///
/// With a `DATABASE_URL` the Postgres store is used and its tables are created
/// if missing. Without one, non-production environments fall back to the
/// in-memory store.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    if config.database.url.is_none() {
        if config.is_production() {
            return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
        }
        tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    schema::ensure_schema(&pool).await?;
    Ok(Arc::new(PgStore::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn production_requires_database_url() {
        let config = AppConfig::production();
        assert!(matches!(
            connect(&config).await,
            Err(DatabaseError::ConfigMissing("DATABASE_URL"))
        ));
    }

    #[tokio::test]
    async fn development_falls_back_to_memory() {
        let store = connect(&AppConfig::development()).await.unwrap();
        store.ping().await.unwrap();
    }
}
