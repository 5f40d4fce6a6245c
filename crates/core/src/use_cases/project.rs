//! Project use-cases.

use std::sync::Arc;

use crate::entities::project::{CreateProject, Project, UpdateProject};
use crate::error::CoreError;
use crate::repository::ProjectRepository;
use crate::types::DbId;
use crate::use_cases::does_not_exist;
use crate::validation::validate;

#[derive(Clone)]
pub struct ProjectUseCases {
    repo: Arc<dyn ProjectRepository>,
}

impl ProjectUseCases {
    pub fn new(repo: Arc<dyn ProjectRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: DbId) -> Result<Option<Project>, CoreError> {
        self.repo.get(id).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Project>, CoreError> {
        self.repo.list().await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &CreateProject) -> Result<Project, CoreError> {
        validate(input)?;
        let project = self.repo.create(input).await?;
        tracing::info!(project_id = project.id, "Project created");
        Ok(project)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: DbId, input: &UpdateProject) -> Result<(), CoreError> {
        validate(input)?;
        self.repo
            .update(id, input)
            .await
            .map_err(does_not_exist("project"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(does_not_exist("project"))?;
        tracing::info!(project_id = id, "Project deleted");
        Ok(())
    }
}
