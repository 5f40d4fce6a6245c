//! Repository contracts.
//!
//! Use-cases depend on these traits only. Every mutation is existence
//! checked inside the implementation: `update`/`delete` on an id that does
//! not resolve fail with [`CoreError::NotFound`], as does attaching a child
//! to a missing parent. `list` returns an empty `Vec` when nothing matches.

use async_trait::async_trait;

use crate::entities::project::{CreateProject, Project, UpdateProject};
use crate::entities::scenario::{
    Actor, Context, CreateActor, CreateContext, CreateEpisode, CreateException, CreateGroup,
    CreateResource, CreateRestriction, CreateScenario, Episode, Exception, Group, Resource,
    Restriction, Scenario, UpdateScenario,
};
use crate::entities::symbol::{
    CreateImpact, CreateSymbol, CreateSynonym, Impact, Symbol, Synonym, UpdateSymbol,
};
use crate::entities::user::{NewUser, User};
use crate::error::CoreError;
use crate::relations::{Loadable, ProjectRelation, ScenarioRelation, SymbolRelation};
use crate::types::DbId;

pub type RepoResult<T> = Result<T, CoreError>;

#[async_trait]
pub trait ProjectRepository: Loadable<ProjectRelation> + Send + Sync {
    async fn get(&self, id: DbId) -> RepoResult<Option<Project>>;
    async fn list(&self) -> RepoResult<Vec<Project>>;
    async fn create(&self, input: &CreateProject) -> RepoResult<Project>;
    async fn update(&self, id: DbId, input: &UpdateProject) -> RepoResult<()>;
    /// Deletes the project together with its symbols and scenarios.
    async fn delete(&self, id: DbId) -> RepoResult<()>;
}

#[async_trait]
pub trait SymbolRepository: Loadable<SymbolRelation> + Send + Sync {
    async fn get(&self, id: DbId) -> RepoResult<Option<Symbol>>;
    async fn list(&self, project_id: DbId) -> RepoResult<Vec<Symbol>>;
    /// Fails with `NotFound` for the project when `project_id` does not resolve.
    async fn create(&self, input: &CreateSymbol) -> RepoResult<Symbol>;
    async fn update(&self, id: DbId, input: &UpdateSymbol) -> RepoResult<()>;
    async fn delete(&self, id: DbId) -> RepoResult<()>;

    async fn create_impact(&self, input: &CreateImpact) -> RepoResult<Impact>;
    async fn delete_impact(&self, id: DbId) -> RepoResult<()>;
    async fn create_synonym(&self, input: &CreateSynonym) -> RepoResult<Synonym>;
    async fn delete_synonym(&self, id: DbId) -> RepoResult<()>;
}

#[async_trait]
pub trait ScenarioRepository: Loadable<ScenarioRelation> + Send + Sync {
    async fn get(&self, id: DbId) -> RepoResult<Option<Scenario>>;
    async fn list(&self, project_id: DbId) -> RepoResult<Vec<Scenario>>;
    async fn create(&self, input: &CreateScenario) -> RepoResult<Scenario>;
    /// Applies the supplied fields; a supplied context replaces the current one.
    async fn update(&self, id: DbId, input: &UpdateScenario) -> RepoResult<()>;
    async fn delete(&self, id: DbId) -> RepoResult<()>;

    async fn create_exception(&self, input: &CreateException) -> RepoResult<Exception>;
    async fn delete_exception(&self, id: DbId) -> RepoResult<()>;
    /// Sets the scenario context, replacing an existing one.
    async fn create_context(&self, input: &CreateContext) -> RepoResult<Context>;
    async fn delete_context(&self, id: DbId) -> RepoResult<()>;
    async fn create_restriction(&self, input: &CreateRestriction) -> RepoResult<Restriction>;
    async fn delete_restriction(&self, id: DbId) -> RepoResult<()>;
    async fn create_resource(&self, input: &CreateResource) -> RepoResult<Resource>;
    async fn delete_resource(&self, id: DbId) -> RepoResult<()>;
    /// Fails with `Conflict` when the position is taken in the scenario.
    async fn create_episode(&self, input: &CreateEpisode) -> RepoResult<Episode>;
    async fn delete_episode(&self, id: DbId) -> RepoResult<()>;

    /// Finds or creates the actor by name and links it to the scenario.
    async fn create_actor(&self, input: &CreateActor) -> RepoResult<Actor>;
    /// Removes the association; fails with `NotFound` when not linked.
    async fn delete_actor(&self, scenario_id: DbId, actor_id: DbId) -> RepoResult<()>;
    async fn create_group(&self, input: &CreateGroup) -> RepoResult<Group>;
    async fn delete_group(&self, scenario_id: DbId, group_id: DbId) -> RepoResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Fails with `EmailInUse` when the email is already registered.
    async fn create(&self, input: &NewUser) -> RepoResult<User>;
}

/// Hashing port for user credentials.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, CoreError>;
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, CoreError>;
}

/// Extract a required id from a validated DTO.
pub fn required_id(value: Option<DbId>, field: &str) -> RepoResult<DbId> {
    value.ok_or_else(|| CoreError::MissingParam(format!("{field} should not be empty")))
}
