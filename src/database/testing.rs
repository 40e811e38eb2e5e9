//! Behaviour every [`Store`] backend must share.
//!
//! Call [`run_store_conformance_tests`] from a backend's test module. Each
//! check registers its own identities so the suite can run against a shared
//! database.

use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{ContentBlock, UpdateDataItem, UpdateProject, User};
use super::store::Store;

async fn fresh_user(store: &dyn Store) -> Result<User, DatabaseError> {
    store.resolve_user(&format!("conformance-{}", Uuid::new_v4().simple())).await
}

/// Run the full store conformance suite.
///
/// # Errors
///
/// Returns an error if the backend fails an operation outright; behavioural
/// mismatches panic through `assert!`.
pub async fn run_store_conformance_tests(store: &dyn Store) -> Result<(), DatabaseError> {
    test_resolve_user_once_per_identity(store).await?;
    test_project_listing(store).await?;
    test_project_partial_update(store).await?;
    test_missing_records(store).await?;
    test_message_round_trip(store).await?;
    test_data_items_scoped_to_project(store).await?;
    test_data_item_partial_update(store).await?;
    store.ping().await?;
    Ok(())
}

async fn test_resolve_user_once_per_identity(store: &dyn Store) -> Result<(), DatabaseError> {
    let token = format!("conformance-{}", Uuid::new_v4().simple());
    let first = store.resolve_user(&token).await?;
    let again = store.resolve_user(&token).await?;
    let other = fresh_user(store).await?;

    assert_eq!(first, again, "same identity must map to one user");
    assert_eq!(first.external_id, token);
    assert_ne!(first.id, other.id);
    Ok(())
}

async fn test_project_listing(store: &dyn Store) -> Result<(), DatabaseError> {
    let owner = fresh_user(store).await?;
    let stranger = fresh_user(store).await?;

    let a = store.insert_project(owner.id, "a").await?;
    store.insert_project(owner.id, "b").await?;
    store.insert_project(owner.id, "c").await?;
    store.insert_project(stranger.id, "other").await?;

    let update = UpdateProject { name: None, deleted: Some(true) };
    store.update_project(a.id, &update).await?;

    let names: Vec<String> = store
        .list_projects(owner.id, 10)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["b", "c"], "soft-deleted skipped, creation order kept");
    assert_eq!(store.list_projects(owner.id, 1).await?.len(), 1, "limit applies");

    let found = store.find_project(a.id).await?;
    assert!(found.is_some_and(|p| p.deleted), "soft-deleted project stays addressable");
    Ok(())
}

async fn test_project_partial_update(store: &dyn Store) -> Result<(), DatabaseError> {
    let owner = fresh_user(store).await?;
    let project = store.insert_project(owner.id, "Old Name").await?;
    assert!(!project.deleted);
    assert!(project.updated_at.is_none());

    let renamed = store
        .update_project(project.id, &UpdateProject { name: Some("New Name".to_string()), deleted: None })
        .await?;
    assert_eq!(renamed.name, "New Name");
    assert!(!renamed.deleted);
    assert!(renamed.updated_at.is_some());
    assert_eq!(renamed.created_at, project.created_at);

    let deleted = store
        .update_project(project.id, &UpdateProject { name: None, deleted: Some(true) })
        .await?;
    assert_eq!(deleted.name, "New Name", "absent name is left untouched");
    assert!(deleted.deleted);

    let restored = store
        .update_project(project.id, &UpdateProject { name: None, deleted: Some(false) })
        .await?;
    assert!(!restored.deleted);
    assert_eq!(store.list_projects(owner.id, 10).await?, vec![restored]);
    Ok(())
}

async fn test_missing_records(store: &dyn Store) -> Result<(), DatabaseError> {
    let missing = Uuid::new_v4();
    assert!(store.find_project(missing).await?.is_none());
    assert!(store.find_data_item(missing, missing).await?.is_none());
    assert!(store.list_data_items(missing, 10).await?.is_empty());

    let update = UpdateProject { name: Some("x".to_string()), deleted: None };
    assert!(matches!(
        store.update_project(missing, &update).await,
        Err(DatabaseError::NotFound(_))
    ));
    assert!(matches!(
        store.update_data_item(missing, missing, &UpdateDataItem::soft_delete()).await,
        Err(DatabaseError::NotFound(_))
    ));
    Ok(())
}

async fn test_message_round_trip(store: &dyn Store) -> Result<(), DatabaseError> {
    let owner = fresh_user(store).await?;
    let project = store.insert_project(owner.id, "Messages").await?;

    let input = vec![
        ContentBlock::text("Describe this"),
        ContentBlock::image("https://example.com/cat.png"),
    ];
    let output = vec![ContentBlock::text("A cat")];
    let item = store.insert_data_item(project.id, &input, Some(&output)).await?;

    assert_eq!(item.project_id, project.id);
    assert_eq!(item.input_message, input, "block order and kinds survive storage");
    assert_eq!(item.output_message.as_ref(), Some(&output));
    assert!(!item.deleted);

    let bare = store.insert_data_item(project.id, &input, None).await?;
    assert!(bare.output_message.is_none());

    assert_eq!(store.find_data_item(item.id, project.id).await?, Some(item.clone()));
    assert_eq!(store.list_data_items(project.id, 10).await?, vec![item, bare]);
    Ok(())
}

async fn test_data_items_scoped_to_project(store: &dyn Store) -> Result<(), DatabaseError> {
    let owner = fresh_user(store).await?;
    let p1 = store.insert_project(owner.id, "p1").await?;
    let p2 = store.insert_project(owner.id, "p2").await?;
    let item = store.insert_data_item(p1.id, &vec![ContentBlock::text("Hello")], None).await?;

    assert!(store.find_data_item(item.id, p1.id).await?.is_some());
    assert!(store.find_data_item(item.id, p2.id).await?.is_none());
    assert!(store.list_data_items(p2.id, 10).await?.is_empty());
    assert!(matches!(
        store.update_data_item(item.id, p2.id, &UpdateDataItem::soft_delete()).await,
        Err(DatabaseError::NotFound(_))
    ));

    let untouched = store.find_data_item(item.id, p1.id).await?;
    assert!(untouched.is_some_and(|i| !i.deleted));
    Ok(())
}

async fn test_data_item_partial_update(store: &dyn Store) -> Result<(), DatabaseError> {
    let owner = fresh_user(store).await?;
    let project = store.insert_project(owner.id, "Updates").await?;
    let first = store.insert_data_item(project.id, &vec![ContentBlock::text("Hello")], None).await?;
    let second = store.insert_data_item(project.id, &vec![ContentBlock::text("Again")], None).await?;

    let output_only = UpdateDataItem {
        output_message: Some(vec![ContentBlock::text("World")]),
        ..UpdateDataItem::default()
    };
    let updated = store.update_data_item(first.id, project.id, &output_only).await?;
    assert_eq!(updated.input_message, vec![ContentBlock::text("Hello")]);
    assert_eq!(updated.output_message, Some(vec![ContentBlock::text("World")]));
    assert!(!updated.deleted);
    assert!(updated.updated_at.is_some());

    let input_only = UpdateDataItem {
        input_message: Some(vec![ContentBlock::text("Hi")]),
        ..UpdateDataItem::default()
    };
    let updated = store.update_data_item(first.id, project.id, &input_only).await?;
    assert_eq!(updated.input_message, vec![ContentBlock::text("Hi")]);
    assert_eq!(updated.output_message, Some(vec![ContentBlock::text("World")]), "absent output kept");

    store.update_data_item(first.id, project.id, &UpdateDataItem::soft_delete()).await?;
    let listed: Vec<Uuid> = store.list_data_items(project.id, 10).await?.into_iter().map(|i| i.id).collect();
    assert_eq!(listed, vec![second.id]);
    assert_eq!(store.list_data_items(project.id, 1).await?.len(), 1);

    let restore = UpdateDataItem { deleted: Some(false), ..UpdateDataItem::default() };
    let restored = store.update_data_item(first.id, project.id, &restore).await?;
    assert!(!restored.deleted);
    assert_eq!(restored.input_message, vec![ContentBlock::text("Hi")]);
    let listed: Vec<Uuid> = store.list_data_items(project.id, 10).await?.into_iter().map(|i| i.id).collect();
    assert_eq!(listed, vec![first.id, second.id]);
    Ok(())
}
