use uuid::Uuid;

use crate::auth::{owns, Caller};
use crate::database::models::{CreateProject, Project, UpdateProject, Validate};
use crate::database::Store;

use super::{ServiceError, ServiceResult};

/// Resolve a project the caller owns, or NotFound.
pub(crate) async fn owned_project(store: &dyn Store, caller: &Caller, project_id: Uuid) -> ServiceResult<Project> {
    match store.find_project(project_id).await? {
        Some(project) if owns(caller, &project) => Ok(project),
        Some(_) => {
            tracing::debug!("user {} denied access to project {}", caller.user_id(), project_id);
            Err(ServiceError::NotFound("Project"))
        }
        None => Err(ServiceError::NotFound("Project")),
    }
}

pub struct ProjectService<'a> {
    store: &'a dyn Store,
    caller: &'a Caller,
    list_limit: i64,
}

impl<'a> ProjectService<'a> {
    pub fn new(store: &'a dyn Store, caller: &'a Caller, list_limit: i64) -> Self {
        Self { store, caller, list_limit }
    }

    /// New project owned by the caller
    pub async fn create(&self, request: &CreateProject) -> ServiceResult<Project> {
        request.validate().map_err(ServiceError::Validation)?;
        let project = self.store.insert_project(self.caller.user_id(), &request.name).await?;
        tracing::info!("user {} created project {}", self.caller.user_id(), project.id);
        Ok(project)
    }

    /// Active projects owned by the caller
    pub async fn list(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.store.list_projects(self.caller.user_id(), self.list_limit).await?)
    }

    /// Soft-deleted projects remain addressable here
    pub async fn get(&self, project_id: Uuid) -> ServiceResult<Project> {
        owned_project(self.store, self.caller, project_id).await
    }

    /// Field-by-field partial update. Setting `deleted: false` restores a
    /// soft-deleted project.
    pub async fn update(&self, project_id: Uuid, request: &UpdateProject) -> ServiceResult<Project> {
        request.validate().map_err(ServiceError::Validation)?;
        let project = owned_project(self.store, self.caller, project_id).await?;
        if request.is_empty() {
            return Ok(project);
        }

        let updated = self.store.update_project(project.id, request).await?;
        tracing::info!("user {} updated project {}", self.caller.user_id(), project.id);
        Ok(updated)
    }
}
