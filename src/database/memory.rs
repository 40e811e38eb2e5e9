use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{DataItem, Message, Project, UpdateDataItem, UpdateProject, User};
use super::store::Store;

#[derive(Debug, Default)]
struct MemoryState {
    users: Vec<User>,
    projects: Vec<Project>,
    data_items: Vec<DataItem>,
}

/// In-process [`Store`] for development without Postgres and for tests.
///
/// Records are kept in insertion order, which doubles as creation order for
/// listings. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn resolve_user(&self, external_id: &str) -> Result<User, DatabaseError> {
        // Fast path: try read lock
        {
            let state = self.state.read().await;
            if let Some(user) = state.users.iter().find(|u| u.external_id == external_id) {
                return Ok(user.clone());
            }
        }

        let mut state = self.state.write().await;
        // Another writer may have registered the same identity in between.
        if let Some(user) = state.users.iter().find(|u| u.external_id == external_id) {
            return Ok(user.clone());
        }
        let user = User {
            id: state.users.len() as i64 + 1,
            external_id: external_id.to_string(),
        };
        state.users.push(user.clone());
        tracing::info!("Registered new user {}", user.id);
        Ok(user)
    }

    async fn insert_project(&self, owner_id: i64, name: &str) -> Result<Project, DatabaseError> {
        let project = Project {
            id: Uuid::new_v4(),
            name: name.to_string(),
            owner_id,
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.state.write().await.projects.push(project.clone());
        Ok(project)
    }

    async fn list_projects(&self, owner_id: i64, limit: i64) -> Result<Vec<Project>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.owner_id == owner_id && !p.deleted)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn update_project(&self, id: Uuid, update: &UpdateProject) -> Result<Project, DatabaseError> {
        let mut state = self.state.write().await;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DatabaseError::NotFound(format!("project {}", id)))?;
        update.apply(project);
        project.updated_at = Some(Utc::now());
        Ok(project.clone())
    }

    async fn insert_data_item(
        &self,
        project_id: Uuid,
        input_message: &Message,
        output_message: Option<&Message>,
    ) -> Result<DataItem, DatabaseError> {
        let item = DataItem {
            id: Uuid::new_v4(),
            project_id,
            input_message: input_message.clone(),
            output_message: output_message.cloned(),
            deleted: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.state.write().await.data_items.push(item.clone());
        Ok(item)
    }

    async fn list_data_items(&self, project_id: Uuid, limit: i64) -> Result<Vec<DataItem>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .data_items
            .iter()
            .filter(|i| i.project_id == project_id && !i.deleted)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn find_data_item(&self, id: Uuid, project_id: Uuid) -> Result<Option<DataItem>, DatabaseError> {
        let state = self.state.read().await;
        Ok(state
            .data_items
            .iter()
            .find(|i| i.id == id && i.project_id == project_id)
            .cloned())
    }

    async fn update_data_item(
        &self,
        id: Uuid,
        project_id: Uuid,
        update: &UpdateDataItem,
    ) -> Result<DataItem, DatabaseError> {
        let mut state = self.state.write().await;
        let item = state
            .data_items
            .iter_mut()
            .find(|i| i.id == id && i.project_id == project_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("data item {}", id)))?;
        update.apply(item);
        item.updated_at = Some(Utc::now());
        Ok(item.clone())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_conformance() {
        let store = MemoryStore::new();
        crate::database::testing::run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }

    #[tokio::test]
    async fn resolve_user_keeps_one_row_per_identity() {
        let store = MemoryStore::new();
        store.resolve_user("user1").await.unwrap();
        store.resolve_user("user1").await.unwrap();
        store.resolve_user("user2").await.unwrap();
        assert_eq!(store.state.read().await.users.len(), 2);
    }
}
