use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{DataItem, Message, Project, UpdateDataItem, UpdateProject, User};
use super::store::Store;

const PROJECT_COLUMNS: &str = "id, name, owner_id, deleted, created_at, updated_at";
const DATA_ITEM_COLUMNS: &str =
    "id, project_id, input_message, output_message, deleted, created_at, updated_at";

/// Row shape of `data_items`; messages live in JSONB columns
#[derive(Debug, FromRow)]
struct DataItemRow {
    id: Uuid,
    project_id: Uuid,
    input_message: Json<Message>,
    output_message: Option<Json<Message>>,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<DataItemRow> for DataItem {
    fn from(row: DataItemRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            input_message: row.input_message.0,
            output_message: row.output_message.map(|m| m.0),
            deleted: row.deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// [`Store`] backed by a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_user(&self, external_id: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT id, external_id FROM users WHERE external_id = $1")
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn resolve_user(&self, external_id: &str) -> Result<User, DatabaseError> {
        if let Some(user) = self.find_user(external_id).await? {
            return Ok(user);
        }

        // A concurrent first request may win the insert; either way re-read the row.
        sqlx::query("INSERT INTO users (external_id) VALUES ($1) ON CONFLICT (external_id) DO NOTHING")
            .bind(external_id)
            .execute(&self.pool)
            .await?;

        let user = self
            .find_user(external_id)
            .await?
            .ok_or_else(|| DatabaseError::QueryError("user row missing after insert".to_string()))?;
        tracing::info!("Registered new user {}", user.id);
        Ok(user)
    }

    async fn insert_project(&self, owner_id: i64, name: &str) -> Result<Project, DatabaseError> {
        let sql = format!(
            "INSERT INTO projects (id, name, owner_id) VALUES ($1, $2, $3) RETURNING {}",
            PROJECT_COLUMNS
        );
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(project)
    }

    async fn list_projects(&self, owner_id: i64, limit: i64) -> Result<Vec<Project>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM projects WHERE owner_id = $1 AND NOT deleted ORDER BY created_at, id LIMIT $2",
            PROJECT_COLUMNS
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(owner_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(projects)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let sql = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(project)
    }

    async fn update_project(&self, id: Uuid, update: &UpdateProject) -> Result<Project, DatabaseError> {
        let sql = format!(
            r#"UPDATE projects
               SET name = COALESCE($2, name),
                   deleted = COALESCE($3, deleted),
                   updated_at = now()
               WHERE id = $1
               RETURNING {}"#,
            PROJECT_COLUMNS
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(update.name.as_deref())
            .bind(update.deleted)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("project {}", id)))
    }

    async fn insert_data_item(
        &self,
        project_id: Uuid,
        input_message: &Message,
        output_message: Option<&Message>,
    ) -> Result<DataItem, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO data_items (id, project_id, input_message, output_message)
               VALUES ($1, $2, $3, $4)
               RETURNING {}"#,
            DATA_ITEM_COLUMNS
        );
        let row = sqlx::query_as::<_, DataItemRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(project_id)
            .bind(Json(input_message))
            .bind(output_message.map(Json))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn list_data_items(&self, project_id: Uuid, limit: i64) -> Result<Vec<DataItem>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM data_items WHERE project_id = $1 AND NOT deleted ORDER BY created_at, id LIMIT $2",
            DATA_ITEM_COLUMNS
        );
        let rows = sqlx::query_as::<_, DataItemRow>(&sql)
            .bind(project_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(DataItem::from).collect())
    }

    async fn find_data_item(&self, id: Uuid, project_id: Uuid) -> Result<Option<DataItem>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM data_items WHERE id = $1 AND project_id = $2",
            DATA_ITEM_COLUMNS
        );
        let row = sqlx::query_as::<_, DataItemRow>(&sql)
            .bind(id)
            .bind(project_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(DataItem::from))
    }

    async fn update_data_item(
        &self,
        id: Uuid,
        project_id: Uuid,
        update: &UpdateDataItem,
    ) -> Result<DataItem, DatabaseError> {
        let sql = format!(
            r#"UPDATE data_items
               SET input_message = COALESCE($3, input_message),
                   output_message = COALESCE($4, output_message),
                   deleted = COALESCE($5, deleted),
                   updated_at = now()
               WHERE id = $1 AND project_id = $2
               RETURNING {}"#,
            DATA_ITEM_COLUMNS
        );
        sqlx::query_as::<_, DataItemRow>(&sql)
            .bind(id)
            .bind(project_id)
            .bind(update.input_message.as_ref().map(Json))
            .bind(update.output_message.as_ref().map(Json))
            .bind(update.deleted)
            .fetch_optional(&self.pool)
            .await?
            .map(DataItem::from)
            .ok_or_else(|| DatabaseError::NotFound(format!("data item {}", id)))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
