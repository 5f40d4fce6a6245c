//! Scenario use-cases and the records a scenario owns.

use std::sync::Arc;

use crate::entities::scenario::{
    Actor, Context, CreateActor, CreateContext, CreateEpisode, CreateException, CreateGroup,
    CreateResource, CreateRestriction, CreateScenario, Episode, Exception, Group, Resource,
    Restriction, Scenario, ScenarioWithLexicons, UpdateScenario,
};
use crate::error::CoreError;
use crate::lexicon::match_lexicon;
use crate::repository::{ScenarioRepository, SymbolRepository};
use crate::types::DbId;
use crate::use_cases::does_not_exist;
use crate::validation::validate;

#[derive(Clone)]
pub struct ScenarioUseCases {
    repo: Arc<dyn ScenarioRepository>,
    symbols: Arc<dyn SymbolRepository>,
}

impl ScenarioUseCases {
    pub fn new(repo: Arc<dyn ScenarioRepository>, symbols: Arc<dyn SymbolRepository>) -> Self {
        Self { repo, symbols }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: DbId) -> Result<Option<Scenario>, CoreError> {
        self.repo.get(id).await
    }

    /// The scenario plus the symbols of its project that its text mentions.
    #[tracing::instrument(skip(self))]
    pub async fn get_with_lexicons(
        &self,
        id: DbId,
    ) -> Result<Option<ScenarioWithLexicons>, CoreError> {
        let Some(scenario) = self.repo.get(id).await? else {
            return Ok(None);
        };
        let lexicon = self.symbols.list(scenario.project_id).await?;
        let lexicons = match_lexicon(&scenario, &lexicon);
        tracing::debug!(matches = lexicons.len(), "Lexicon matched");
        Ok(Some(ScenarioWithLexicons { scenario, lexicons }))
    }

    /// All scenarios of a project; empty when the project has none.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, project_id: DbId) -> Result<Vec<Scenario>, CoreError> {
        self.repo.list(project_id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &CreateScenario) -> Result<Scenario, CoreError> {
        validate(input)?;
        let scenario = self.repo.create(input).await?;
        tracing::info!(
            scenario_id = scenario.id,
            project_id = scenario.project_id,
            "Scenario created"
        );
        Ok(scenario)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: DbId, input: &UpdateScenario) -> Result<(), CoreError> {
        validate(input)?;
        self.repo
            .update(id, input)
            .await
            .map_err(does_not_exist("scenario"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(does_not_exist("scenario"))
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_exception(&self, input: &CreateException) -> Result<Exception, CoreError> {
        validate(input)?;
        self.repo.create_exception(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_exception(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_exception(id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_context(&self, input: &CreateContext) -> Result<Context, CoreError> {
        validate(input)?;
        self.repo.create_context(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_context(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_context(id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_restriction(
        &self,
        input: &CreateRestriction,
    ) -> Result<Restriction, CoreError> {
        validate(input)?;
        self.repo.create_restriction(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_restriction(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_restriction(id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_resource(&self, input: &CreateResource) -> Result<Resource, CoreError> {
        validate(input)?;
        self.repo.create_resource(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_resource(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_resource(id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_episode(&self, input: &CreateEpisode) -> Result<Episode, CoreError> {
        validate(input)?;
        self.repo.create_episode(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_episode(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_episode(id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_actor(&self, input: &CreateActor) -> Result<Actor, CoreError> {
        validate(input)?;
        self.repo.create_actor(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_actor(&self, scenario_id: DbId, actor_id: DbId) -> Result<(), CoreError> {
        self.repo.delete_actor(scenario_id, actor_id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_group(&self, input: &CreateGroup) -> Result<Group, CoreError> {
        validate(input)?;
        self.repo.create_group(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_group(&self, scenario_id: DbId, group_id: DbId) -> Result<(), CoreError> {
        self.repo.delete_group(scenario_id, group_id).await
    }
}
