use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        external_id TEXT NOT NULL UNIQUE
    )
"#;

const CREATE_PROJECTS: &str = r#"
    CREATE TABLE IF NOT EXISTS projects (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        owner_id BIGINT NOT NULL REFERENCES users(id),
        deleted BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ
    )
"#;

const CREATE_DATA_ITEMS: &str = r#"
    CREATE TABLE IF NOT EXISTS data_items (
        id UUID PRIMARY KEY,
        project_id UUID NOT NULL REFERENCES projects(id),
        input_message JSONB NOT NULL,
        output_message JSONB,
        deleted BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ
    )
"#;

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS projects_owner_idx ON projects (owner_id, created_at)",
    "CREATE INDEX IF NOT EXISTS data_items_project_idx ON data_items (project_id, created_at)",
];

/// Create the tables if they do not exist yet. Safe to run on every start.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    for ddl in [CREATE_USERS, CREATE_PROJECTS, CREATE_DATA_ITEMS]
        .into_iter()
        .chain(CREATE_INDEXES)
    {
        sqlx::query(ddl).execute(pool).await?;
    }

    info!("Database schema is in place");
    Ok(())
}
