use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{DataItem, Message, Project, UpdateDataItem, UpdateProject, User};

/// Persistence for users, projects and data items.
///
/// Lookups are by primary key only; deciding whether the caller may see a
/// record is left to the access layer. Listings exclude soft-deleted rows,
/// come back in creation order and never exceed `limit`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Return the user for `external_id`, inserting it on first sight.
    async fn resolve_user(&self, external_id: &str) -> Result<User, DatabaseError>;

    async fn insert_project(&self, owner_id: i64, name: &str) -> Result<Project, DatabaseError>;

    async fn list_projects(&self, owner_id: i64, limit: i64) -> Result<Vec<Project>, DatabaseError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError>;

    /// Apply the present fields and bump `updated_at`.
    async fn update_project(&self, id: Uuid, update: &UpdateProject) -> Result<Project, DatabaseError>;

    async fn insert_data_item(
        &self,
        project_id: Uuid,
        input_message: &Message,
        output_message: Option<&Message>,
    ) -> Result<DataItem, DatabaseError>;

    async fn list_data_items(&self, project_id: Uuid, limit: i64) -> Result<Vec<DataItem>, DatabaseError>;

    /// Only matches when the item belongs to `project_id`.
    async fn find_data_item(&self, id: Uuid, project_id: Uuid) -> Result<Option<DataItem>, DatabaseError>;

    async fn update_data_item(
        &self,
        id: Uuid,
        project_id: Uuid,
        update: &UpdateDataItem,
    ) -> Result<DataItem, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
