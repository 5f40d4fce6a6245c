//! In-process implementation of the repository contracts.
//!
//! Mirrors the constraints of the relational schema (parent existence,
//! unique episode positions, cascading deletes) over a set of ordered maps
//! behind one lock. Used when the API runs without `DATABASE_URL` and by
//! the test suites.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::entities::project::{CreateProject, Project, UpdateProject};
use crate::entities::scenario::{
    Actor, Context, ContextFields, CreateActor, CreateContext, CreateEpisode, CreateException,
    CreateGroup, CreateResource, CreateRestriction, CreateScenario, Episode, Exception, Group,
    Resource, Restriction, Scenario, UpdateScenario,
};
use crate::entities::symbol::{
    CreateImpact, CreateSymbol, CreateSynonym, Impact, Symbol, Synonym, UpdateSymbol,
};
use crate::entities::user::{NewUser, User};
use crate::error::CoreError;
use crate::relations::{Loadable, ProjectRelation, ScenarioRelation, SymbolRelation};
use crate::repository::{
    required_id, ProjectRepository, RepoResult, ScenarioRepository, SymbolRepository,
    UserRepository,
};
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    last_id: DbId,
    projects: BTreeMap<DbId, Project>,
    symbols: BTreeMap<DbId, Symbol>,
    synonyms: BTreeMap<DbId, Synonym>,
    impacts: BTreeMap<DbId, Impact>,
    scenarios: BTreeMap<DbId, Scenario>,
    contexts: BTreeMap<DbId, Context>,
    exceptions: BTreeMap<DbId, Exception>,
    restrictions: BTreeMap<DbId, Restriction>,
    resources: BTreeMap<DbId, Resource>,
    episodes: BTreeMap<DbId, Episode>,
    actors: BTreeMap<DbId, Actor>,
    groups: BTreeMap<DbId, Group>,
    /// `(scenario_id, actor_id)` pairs.
    scenario_actors: BTreeSet<(DbId, DbId)>,
    /// `(scenario_id, group_id)` pairs.
    scenario_groups: BTreeSet<(DbId, DbId)>,
    users: BTreeMap<DbId, User>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn require_project(&self, id: DbId) -> RepoResult<()> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: "Project", id })
        }
    }

    fn require_symbol(&self, id: DbId) -> RepoResult<()> {
        if self.symbols.contains_key(&id) {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: "Symbol", id })
        }
    }

    fn require_scenario(&self, id: DbId) -> RepoResult<()> {
        if self.scenarios.contains_key(&id) {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: "Scenario", id })
        }
    }

    /// Assemble a symbol with its children.
    fn symbol(&self, row: &Symbol, deep: bool) -> Symbol {
        let mut symbol = row.clone();
        if deep {
            symbol.synonyms = self
                .synonyms
                .values()
                .filter(|s| s.symbol_id == row.id)
                .cloned()
                .collect();
            symbol.impacts = self
                .impacts
                .values()
                .filter(|i| i.symbol_id == row.id)
                .cloned()
                .collect();
        }
        symbol
    }

    /// Assemble a scenario with the records it owns and its associations.
    fn scenario(&self, row: &Scenario, deep: bool) -> Scenario {
        let mut scenario = row.clone();
        if !deep {
            return scenario;
        }
        let id = row.id;
        scenario.context = self.contexts.values().find(|c| c.scenario_id == id).cloned();
        scenario.exceptions = owned_by(&self.exceptions, id, |e| e.scenario_id);
        scenario.restrictions = owned_by(&self.restrictions, id, |r| r.scenario_id);
        scenario.resources = owned_by(&self.resources, id, |r| r.scenario_id);
        scenario.episodes = owned_by(&self.episodes, id, |e| e.scenario_id);
        scenario.episodes.sort_by_key(|e| e.position);
        scenario.actors = self
            .scenario_actors
            .iter()
            .filter(|(sid, _)| *sid == id)
            .filter_map(|(_, actor_id)| self.actors.get(actor_id).cloned())
            .collect();
        scenario.groups = self
            .scenario_groups
            .iter()
            .filter(|(sid, _)| *sid == id)
            .filter_map(|(_, group_id)| self.groups.get(group_id).cloned())
            .collect();
        scenario
    }

    fn remove_symbol(&mut self, id: DbId) -> bool {
        self.synonyms.retain(|_, s| s.symbol_id != id);
        self.impacts.retain(|_, i| i.symbol_id != id);
        self.symbols.remove(&id).is_some()
    }

    fn remove_scenario(&mut self, id: DbId) -> bool {
        self.contexts.retain(|_, c| c.scenario_id != id);
        self.exceptions.retain(|_, e| e.scenario_id != id);
        self.restrictions.retain(|_, r| r.scenario_id != id);
        self.resources.retain(|_, r| r.scenario_id != id);
        self.episodes.retain(|_, e| e.scenario_id != id);
        self.scenario_actors.retain(|(sid, _)| *sid != id);
        self.scenario_groups.retain(|(sid, _)| *sid != id);
        let removed = self.scenarios.remove(&id).is_some();
        self.prune_unlinked();
        removed
    }

    /// Drop actors and groups no scenario links to any more.
    fn prune_unlinked(&mut self) {
        let linked_actors: BTreeSet<DbId> = self.scenario_actors.iter().map(|(_, a)| *a).collect();
        self.actors.retain(|id, _| linked_actors.contains(id));
        let linked_groups: BTreeSet<DbId> = self.scenario_groups.iter().map(|(_, g)| *g).collect();
        self.groups.retain(|id, _| linked_groups.contains(id));
    }

    /// Insert or replace the context of a scenario.
    fn upsert_context(&mut self, scenario_id: DbId, fields: &ContextFields) -> Context {
        let existing = self
            .contexts
            .values()
            .find(|c| c.scenario_id == scenario_id)
            .map(|c| c.id);
        let id = match existing {
            Some(id) => id,
            None => self.next_id(),
        };
        let context = Context {
            id,
            scenario_id,
            geographic_location: fields.geographic_location.clone(),
            temporal_location: fields.temporal_location.clone(),
            precondition: fields.precondition.clone(),
        };
        self.contexts.insert(id, context.clone());
        context
    }
}

fn owned_by<T: Clone>(table: &BTreeMap<DbId, T>, owner: DbId, key: impl Fn(&T) -> DbId) -> Vec<T> {
    table.values().filter(|row| key(row) == owner).cloned().collect()
}

fn remove_or_not_found<T>(
    table: &mut BTreeMap<DbId, T>,
    entity: &'static str,
    id: DbId,
) -> RepoResult<()> {
    table
        .remove(&id)
        .map(|_| ())
        .ok_or(CoreError::NotFound { entity, id })
}

/// Shared in-memory store. Cloning shares the underlying tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Loadable<ProjectRelation> for MemoryStore {
    fn eager_relations(&self) -> &[ProjectRelation] {
        ProjectRelation::ALL
    }
}

impl Loadable<SymbolRelation> for MemoryStore {
    fn eager_relations(&self) -> &[SymbolRelation] {
        SymbolRelation::ALL
    }
}

impl Loadable<ScenarioRelation> for MemoryStore {
    fn eager_relations(&self) -> &[ScenarioRelation] {
        ScenarioRelation::ALL
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn get(&self, id: DbId) -> RepoResult<Option<Project>> {
        let t = self.tables.read().await;
        Ok(t.projects.get(&id).map(|row| {
            let mut project = row.clone();
            project.symbols = t
                .symbols
                .values()
                .filter(|s| s.project_id == id)
                .map(|s| t.symbol(s, false))
                .collect();
            project.scenarios = t
                .scenarios
                .values()
                .filter(|s| s.project_id == id)
                .map(|s| t.scenario(s, false))
                .collect();
            project
        }))
    }

    async fn list(&self) -> RepoResult<Vec<Project>> {
        let t = self.tables.read().await;
        Ok(t.projects.values().cloned().collect())
    }

    async fn create(&self, input: &CreateProject) -> RepoResult<Project> {
        let mut t = self.tables.write().await;
        let now = Utc::now();
        let project = Project {
            id: t.next_id(),
            name: input.name.clone(),
            description: input.description.clone(),
            symbols: vec![],
            scenarios: vec![],
            created_at: now,
            updated_at: now,
        };
        t.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn update(&self, id: DbId, input: &UpdateProject) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        let project = t
            .projects
            .get_mut(&id)
            .ok_or(CoreError::NotFound { entity: "Project", id })?;
        if let Some(name) = &input.name {
            project.name = name.clone();
        }
        if let Some(description) = &input.description {
            project.description = Some(description.clone());
        }
        project.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        t.require_project(id)?;

        let symbol_ids: Vec<DbId> = owned_by(&t.symbols, id, |s| s.project_id)
            .iter()
            .map(|s| s.id)
            .collect();
        for symbol_id in symbol_ids {
            t.remove_symbol(symbol_id);
        }
        let scenario_ids: Vec<DbId> = owned_by(&t.scenarios, id, |s| s.project_id)
            .iter()
            .map(|s| s.id)
            .collect();
        for scenario_id in scenario_ids {
            t.remove_scenario(scenario_id);
        }
        t.projects.remove(&id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

#[async_trait]
impl SymbolRepository for MemoryStore {
    async fn get(&self, id: DbId) -> RepoResult<Option<Symbol>> {
        let t = self.tables.read().await;
        Ok(t.symbols.get(&id).map(|s| t.symbol(s, true)))
    }

    async fn list(&self, project_id: DbId) -> RepoResult<Vec<Symbol>> {
        let t = self.tables.read().await;
        Ok(t.symbols
            .values()
            .filter(|s| s.project_id == project_id)
            .map(|s| t.symbol(s, true))
            .collect())
    }

    async fn create(&self, input: &CreateSymbol) -> RepoResult<Symbol> {
        let project_id = required_id(input.project_id, "project_id")?;
        let mut t = self.tables.write().await;
        t.require_project(project_id)?;

        let now = Utc::now();
        let symbol = Symbol {
            id: t.next_id(),
            project_id,
            name: input.name.clone(),
            classification: input.classification.clone(),
            notion: input.notion.clone(),
            synonyms: vec![],
            impacts: vec![],
            created_at: now,
            updated_at: now,
        };
        t.symbols.insert(symbol.id, symbol.clone());
        Ok(symbol)
    }

    async fn update(&self, id: DbId, input: &UpdateSymbol) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        let symbol = t
            .symbols
            .get_mut(&id)
            .ok_or(CoreError::NotFound { entity: "Symbol", id })?;
        if let Some(name) = &input.name {
            symbol.name = name.clone();
        }
        if let Some(classification) = &input.classification {
            symbol.classification = classification.clone();
        }
        if let Some(notion) = &input.notion {
            symbol.notion = Some(notion.clone());
        }
        symbol.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.remove_symbol(id) {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: "Symbol", id })
        }
    }

    async fn create_impact(&self, input: &CreateImpact) -> RepoResult<Impact> {
        let symbol_id = required_id(input.symbol_id, "symbol_id")?;
        let mut t = self.tables.write().await;
        t.require_symbol(symbol_id)?;
        let impact = Impact {
            id: t.next_id(),
            symbol_id,
            description: input.description.clone(),
            created_at: Utc::now(),
        };
        t.impacts.insert(impact.id, impact.clone());
        Ok(impact)
    }

    async fn delete_impact(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.impacts, "Impact", id)
    }

    async fn create_synonym(&self, input: &CreateSynonym) -> RepoResult<Synonym> {
        let symbol_id = required_id(input.symbol_id, "symbol_id")?;
        let mut t = self.tables.write().await;
        t.require_symbol(symbol_id)?;
        let synonym = Synonym {
            id: t.next_id(),
            symbol_id,
            name: input.name.clone(),
            created_at: Utc::now(),
        };
        t.synonyms.insert(synonym.id, synonym.clone());
        Ok(synonym)
    }

    async fn delete_synonym(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.synonyms, "Synonym", id)
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[async_trait]
impl ScenarioRepository for MemoryStore {
    async fn get(&self, id: DbId) -> RepoResult<Option<Scenario>> {
        let t = self.tables.read().await;
        Ok(t.scenarios.get(&id).map(|s| t.scenario(s, true)))
    }

    async fn list(&self, project_id: DbId) -> RepoResult<Vec<Scenario>> {
        let t = self.tables.read().await;
        Ok(t.scenarios
            .values()
            .filter(|s| s.project_id == project_id)
            .map(|s| t.scenario(s, true))
            .collect())
    }

    async fn create(&self, input: &CreateScenario) -> RepoResult<Scenario> {
        let project_id = required_id(input.project_id, "project_id")?;
        let mut t = self.tables.write().await;
        t.require_project(project_id)?;

        let now = Utc::now();
        let scenario = Scenario {
            id: t.next_id(),
            project_id,
            title: input.title.clone(),
            goal: input.goal.clone(),
            context: None,
            exceptions: vec![],
            restrictions: vec![],
            resources: vec![],
            episodes: vec![],
            actors: vec![],
            groups: vec![],
            created_at: now,
            updated_at: now,
        };
        t.scenarios.insert(scenario.id, scenario.clone());
        Ok(scenario)
    }

    async fn update(&self, id: DbId, input: &UpdateScenario) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        let scenario = t
            .scenarios
            .get_mut(&id)
            .ok_or(CoreError::NotFound { entity: "Scenario", id })?;
        if let Some(title) = &input.title {
            scenario.title = title.clone();
        }
        if let Some(goal) = &input.goal {
            scenario.goal = goal.clone();
        }
        scenario.updated_at = Utc::now();
        if let Some(fields) = &input.context {
            t.upsert_context(id, fields);
        }
        Ok(())
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.remove_scenario(id) {
            Ok(())
        } else {
            Err(CoreError::NotFound { entity: "Scenario", id })
        }
    }

    async fn create_exception(&self, input: &CreateException) -> RepoResult<Exception> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;
        let exception = Exception {
            id: t.next_id(),
            scenario_id,
            description: input.description.clone(),
        };
        t.exceptions.insert(exception.id, exception.clone());
        Ok(exception)
    }

    async fn delete_exception(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.exceptions, "Exception", id)
    }

    async fn create_context(&self, input: &CreateContext) -> RepoResult<Context> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;
        Ok(t.upsert_context(scenario_id, &input.fields()))
    }

    async fn delete_context(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.contexts, "Context", id)
    }

    async fn create_restriction(&self, input: &CreateRestriction) -> RepoResult<Restriction> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;
        let restriction = Restriction {
            id: t.next_id(),
            scenario_id,
            description: input.description.clone(),
        };
        t.restrictions.insert(restriction.id, restriction.clone());
        Ok(restriction)
    }

    async fn delete_restriction(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.restrictions, "Restriction", id)?;
        for episode in t.episodes.values_mut() {
            if episode.restriction_id == Some(id) {
                episode.restriction_id = None;
            }
        }
        Ok(())
    }

    async fn create_resource(&self, input: &CreateResource) -> RepoResult<Resource> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;
        let resource = Resource {
            id: t.next_id(),
            scenario_id,
            name: input.name.clone(),
        };
        t.resources.insert(resource.id, resource.clone());
        Ok(resource)
    }

    async fn delete_resource(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.resources, "Resource", id)
    }

    async fn create_episode(&self, input: &CreateEpisode) -> RepoResult<Episode> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let position = input
            .position
            .ok_or_else(|| CoreError::MissingParam("position should not be empty".into()))?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;

        if t.episodes
            .values()
            .any(|e| e.scenario_id == scenario_id && e.position == position)
        {
            return Err(CoreError::Conflict(format!(
                "Episode position {position} is already used in scenario {scenario_id}"
            )));
        }

        if let Some(restriction_id) = input.restriction_id {
            match t.restrictions.get(&restriction_id) {
                Some(r) if r.scenario_id == scenario_id => {}
                _ => {
                    return Err(CoreError::NotFound {
                        entity: "Restriction",
                        id: restriction_id,
                    })
                }
            }
            if t.episodes
                .values()
                .any(|e| e.restriction_id == Some(restriction_id))
            {
                return Err(CoreError::Conflict(format!(
                    "Restriction {restriction_id} is already linked to an episode"
                )));
            }
        }

        let episode = Episode {
            id: t.next_id(),
            scenario_id,
            position,
            description: input.description.clone(),
            episode_type: input.episode_type.clone(),
            restriction_id: input.restriction_id,
        };
        t.episodes.insert(episode.id, episode.clone());
        Ok(episode)
    }

    async fn delete_episode(&self, id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        remove_or_not_found(&mut t.episodes, "Episode", id)
    }

    async fn create_actor(&self, input: &CreateActor) -> RepoResult<Actor> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;

        let actor = match t.actors.values().find(|a| a.name == input.name).cloned() {
            Some(actor) => actor,
            None => {
                let actor = Actor {
                    id: t.next_id(),
                    name: input.name.clone(),
                };
                t.actors.insert(actor.id, actor.clone());
                actor
            }
        };
        t.scenario_actors.insert((scenario_id, actor.id));
        Ok(actor)
    }

    async fn delete_actor(&self, scenario_id: DbId, actor_id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.scenario_actors.remove(&(scenario_id, actor_id)) {
            t.prune_unlinked();
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Actor",
                id: actor_id,
            })
        }
    }

    async fn create_group(&self, input: &CreateGroup) -> RepoResult<Group> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut t = self.tables.write().await;
        t.require_scenario(scenario_id)?;

        let group = match t.groups.values().find(|g| g.name == input.name).cloned() {
            Some(group) => group,
            None => {
                let group = Group {
                    id: t.next_id(),
                    name: input.name.clone(),
                };
                t.groups.insert(group.id, group.clone());
                group
            }
        };
        t.scenario_groups.insert((scenario_id, group.id));
        Ok(group)
    }

    async fn delete_group(&self, scenario_id: DbId, group_id: DbId) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.scenario_groups.remove(&(scenario_id, group_id)) {
            t.prune_unlinked();
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Group",
                id: group_id,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, input: &NewUser) -> RepoResult<User> {
        let mut t = self.tables.write().await;
        if t.users.values().any(|u| u.email == input.email) {
            return Err(CoreError::EmailInUse(input.email.clone()));
        }
        let now = Utc::now();
        let user = User {
            id: t.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        t.users.insert(user.id, user.clone());
        Ok(user)
    }
}
