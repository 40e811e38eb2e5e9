use uuid::Uuid;

use crate::auth::{belongs_to, Caller};
use crate::database::models::{CreateDataItem, DataItem, UpdateDataItem, Validate};
use crate::database::Store;

use super::projects::owned_project;
use super::{ServiceError, ServiceResult};

/// Data item operations. Resolution is two-stage: the parent project must be
/// owned by the caller, then the item must live under that project.
pub struct DataItemService<'a> {
    store: &'a dyn Store,
    caller: &'a Caller,
    list_limit: i64,
}

impl<'a> DataItemService<'a> {
    pub fn new(store: &'a dyn Store, caller: &'a Caller, list_limit: i64) -> Self {
        Self { store, caller, list_limit }
    }

    async fn owned_item(&self, project_id: Uuid, item_id: Uuid) -> ServiceResult<DataItem> {
        let project = owned_project(self.store, self.caller, project_id).await?;
        match self.store.find_data_item(item_id, project.id).await? {
            Some(item) if belongs_to(&item, project.id) => Ok(item),
            _ => Err(ServiceError::NotFound("Data item")),
        }
    }

    pub async fn list(&self, project_id: Uuid) -> ServiceResult<Vec<DataItem>> {
        let project = owned_project(self.store, self.caller, project_id).await?;
        Ok(self.store.list_data_items(project.id, self.list_limit).await?)
    }

    pub async fn create(&self, project_id: Uuid, request: &CreateDataItem) -> ServiceResult<DataItem> {
        request.validate().map_err(ServiceError::Validation)?;
        let project = owned_project(self.store, self.caller, project_id).await?;

        let item = self
            .store
            .insert_data_item(project.id, &request.input_message, request.output_message.as_ref())
            .await?;
        tracing::info!("user {} created data item {} in project {}", self.caller.user_id(), item.id, project.id);
        Ok(item)
    }

    pub async fn get(&self, project_id: Uuid, item_id: Uuid) -> ServiceResult<DataItem> {
        self.owned_item(project_id, item_id).await
    }

    /// Present fields overwrite; absent fields are left untouched
    pub async fn update(&self, project_id: Uuid, item_id: Uuid, request: &UpdateDataItem) -> ServiceResult<DataItem> {
        request.validate().map_err(ServiceError::Validation)?;
        let item = self.owned_item(project_id, item_id).await?;
        if request.is_empty() {
            return Ok(item);
        }

        let updated = self.store.update_data_item(item.id, item.project_id, request).await?;
        tracing::info!("user {} updated data item {}", self.caller.user_id(), item.id);
        Ok(updated)
    }

    /// Marks the item deleted; the record itself is retained
    pub async fn soft_delete(&self, project_id: Uuid, item_id: Uuid) -> ServiceResult<DataItem> {
        let item = self.owned_item(project_id, item_id).await?;
        let deleted = self
            .store
            .update_data_item(item.id, item.project_id, &UpdateDataItem::soft_delete())
            .await?;
        tracing::info!("user {} soft-deleted data item {}", self.caller.user_id(), item.id);
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{ContentBlock, CreateProject};
    use crate::database::MemoryStore;
    use crate::services::ProjectService;

    struct Fixture {
        store: MemoryStore,
        owner: Caller,
        other: Caller,
        project_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let owner = crate::auth::resolve_caller(&store, "user1").await.unwrap();
        let other = crate::auth::resolve_caller(&store, "user2").await.unwrap();
        let project_id = ProjectService::new(&store, &owner, 100)
            .create(&CreateProject { name: "Test Project".to_string() })
            .await
            .unwrap()
            .id;
        Fixture { store, owner, other, project_id }
    }

    fn hello() -> CreateDataItem {
        CreateDataItem {
            input_message: vec![ContentBlock::text("Hello")],
            output_message: None,
        }
    }

    #[tokio::test]
    async fn create_echoes_blocks() {
        let f = fixture().await;
        let service = DataItemService::new(&f.store, &f.owner, 100);
        let item = service.create(f.project_id, &hello()).await.unwrap();

        assert_eq!(item.project_id, f.project_id);
        assert_eq!(item.input_message, vec![ContentBlock::text("Hello")]);
        assert_eq!(item.output_message, None);
        assert!(!item.deleted);
    }

    #[tokio::test]
    async fn foreign_project_is_not_found() {
        let f = fixture().await;
        let service = DataItemService::new(&f.store, &f.other, 100);

        assert!(matches!(service.create(f.project_id, &hello()).await, Err(ServiceError::NotFound("Project"))));
        assert!(matches!(service.list(f.project_id).await, Err(ServiceError::NotFound("Project"))));
        assert!(f.store.list_data_items(f.project_id, 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn item_from_another_project_is_not_found() {
        let f = fixture().await;
        let service = DataItemService::new(&f.store, &f.owner, 100);
        let item = service.create(f.project_id, &hello()).await.unwrap();
        let second = ProjectService::new(&f.store, &f.owner, 100)
            .create(&CreateProject { name: "Second".to_string() })
            .await
            .unwrap();

        assert!(matches!(service.get(second.id, item.id).await, Err(ServiceError::NotFound("Data item"))));
        assert!(matches!(service.soft_delete(second.id, item.id).await, Err(ServiceError::NotFound("Data item"))));
        assert!(matches!(
            service.update(second.id, item.id, &UpdateDataItem::soft_delete()).await,
            Err(ServiceError::NotFound("Data item"))
        ));
        assert!(!service.get(f.project_id, item.id).await.unwrap().deleted);
    }

    #[tokio::test]
    async fn update_by_non_owner_is_not_found_and_leaves_item() {
        let f = fixture().await;
        let owner = DataItemService::new(&f.store, &f.owner, 100);
        let item = owner.create(f.project_id, &hello()).await.unwrap();

        let intruder = DataItemService::new(&f.store, &f.other, 100);
        let update = UpdateDataItem {
            input_message: Some(vec![ContentBlock::text("Hijacked")]),
            deleted: Some(true),
            ..UpdateDataItem::default()
        };
        assert!(matches!(
            intruder.update(f.project_id, item.id, &update).await,
            Err(ServiceError::NotFound("Project"))
        ));
        assert_eq!(owner.get(f.project_id, item.id).await.unwrap(), item);
    }

    #[tokio::test]
    async fn soft_delete_hides_from_list_but_keeps_record() {
        let f = fixture().await;
        let service = DataItemService::new(&f.store, &f.owner, 100);
        let item = service.create(f.project_id, &hello()).await.unwrap();

        let deleted = service.soft_delete(f.project_id, item.id).await.unwrap();
        assert!(deleted.deleted);
        assert!(service.list(f.project_id).await.unwrap().is_empty());

        // deleting again leaves the listing unchanged
        service.soft_delete(f.project_id, item.id).await.unwrap();
        assert!(service.list(f.project_id).await.unwrap().is_empty());

        let fetched = service.get(f.project_id, item.id).await.unwrap();
        assert!(fetched.deleted);
        assert_eq!(fetched.input_message, item.input_message);
    }

    #[tokio::test]
    async fn output_only_update_preserves_other_fields() {
        let f = fixture().await;
        let service = DataItemService::new(&f.store, &f.owner, 100);
        let item = service.create(f.project_id, &hello()).await.unwrap();

        let update = UpdateDataItem {
            output_message: Some(vec![ContentBlock::text("Hi there")]),
            ..UpdateDataItem::default()
        };
        let updated = service.update(f.project_id, item.id, &update).await.unwrap();
        assert_eq!(updated.input_message, item.input_message);
        assert_eq!(updated.output_message, Some(vec![ContentBlock::text("Hi there")]));
        assert!(!updated.deleted);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn empty_input_rejected_before_insert() {
        let f = fixture().await;
        let service = DataItemService::new(&f.store, &f.owner, 100);
        let request = CreateDataItem { input_message: vec![], output_message: None };

        assert!(matches!(service.create(f.project_id, &request).await, Err(ServiceError::Validation(_))));
        assert!(service.list(f.project_id).await.unwrap().is_empty());
    }
}
