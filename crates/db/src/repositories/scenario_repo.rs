//! Repository for `scenarios` and the tables a scenario owns or links to.

use std::collections::HashMap;

use async_trait::async_trait;
use scenaria_core::entities::scenario::{
    Actor, Context, ContextFields, CreateActor, CreateContext, CreateEpisode, CreateException,
    CreateGroup, CreateResource, CreateRestriction, CreateScenario, Episode, Exception, Group,
    Resource, Restriction, Scenario, UpdateScenario,
};
use scenaria_core::error::CoreError;
use scenaria_core::relations::{Loadable, ScenarioRelation};
use scenaria_core::repository::{required_id, RepoResult, ScenarioRepository};
use scenaria_core::types::DbId;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::error::{child_insert, storage, unique_violation};
use crate::models::scenario::{
    ContextRow, DescriptionRow, EpisodeRow, LinkedNamedRow, NamedRow, ResourceRow, ScenarioRow,
};
use crate::repositories::{delete_by_id, group_by_parent, prune_unlinked};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, goal, created_at, updated_at";
const CONTEXT_COLUMNS: &str =
    "id, scenario_id, geographic_location, temporal_location, precondition";
const DESCRIPTION_COLUMNS: &str = "id, scenario_id, description";
const RESOURCE_COLUMNS: &str = "id, scenario_id, name";
const EPISODE_COLUMNS: &str = "id, scenario_id, position, description, type, restriction_id";

/// Scenarios of a project without their relations, in creation order.
pub(crate) async fn rows_for_project(
    pool: &PgPool,
    project_id: DbId,
) -> RepoResult<Vec<ScenarioRow>> {
    let query = format!("SELECT {COLUMNS} FROM scenarios WHERE project_id = $1 ORDER BY id");
    sqlx::query_as::<_, ScenarioRow>(&query)
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(storage("list scenarios"))
}

/// Insert or replace the context of a scenario.
async fn upsert_context(
    conn: &mut PgConnection,
    scenario_id: DbId,
    fields: &ContextFields,
) -> RepoResult<Context> {
    let query = format!(
        "INSERT INTO contexts (scenario_id, geographic_location, temporal_location, precondition)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (scenario_id) DO UPDATE SET
            geographic_location = EXCLUDED.geographic_location,
            temporal_location = EXCLUDED.temporal_location,
            precondition = EXCLUDED.precondition
         RETURNING {CONTEXT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, ContextRow>(&query)
        .bind(scenario_id)
        .bind(&fields.geographic_location)
        .bind(&fields.temporal_location)
        .bind(&fields.precondition)
        .fetch_one(conn)
        .await
        .map_err(child_insert("set context", "Scenario", scenario_id))?;
    Ok(row.into())
}

/// Find an actor or group by name, creating it when absent.
async fn find_or_create_named(
    conn: &mut PgConnection,
    table: &'static str,
    name: &str,
) -> RepoResult<NamedRow> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let query = format!(
        "INSERT INTO {table} (name) VALUES ($1)
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
         RETURNING id, name"
    );
    sqlx::query_as::<_, NamedRow>(&query)
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(storage("find or create by name"))
}

/// Load one relation for a batch of scenarios, grouped by scenario id.
async fn load_grouped<T>(
    pool: &PgPool,
    query: &str,
    ids: &[DbId],
    scenario_id: fn(&T) -> DbId,
    operation: &'static str,
) -> RepoResult<HashMap<DbId, Vec<T>>>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let rows = sqlx::query_as::<_, T>(query)
        .bind(ids)
        .fetch_all(pool)
        .await
        .map_err(storage(operation))?;
    Ok(group_by_parent(rows, scenario_id))
}

fn take<T, U: From<T>>(groups: &mut HashMap<DbId, Vec<T>>, id: DbId) -> Vec<U> {
    groups
        .remove(&id)
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect()
}

/// PostgreSQL-backed [`ScenarioRepository`].
///
/// Multi-statement writes (context upsert on update, episode creation,
/// actor/group linking) run in one transaction.
#[derive(Clone)]
pub struct PgScenarioRepo {
    pool: PgPool,
}

impl PgScenarioRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach the declared relations to a batch of scenario rows.
    async fn with_relations(&self, rows: Vec<ScenarioRow>) -> RepoResult<Vec<Scenario>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let pool = &self.pool;

        let mut contexts = HashMap::new();
        if self.loads(ScenarioRelation::Context) {
            let query = format!("SELECT {CONTEXT_COLUMNS} FROM contexts WHERE scenario_id = ANY($1)");
            contexts = load_grouped::<ContextRow>(pool, &query, &ids, |r| r.scenario_id, "load contexts")
                .await?;
        }

        let mut exceptions = HashMap::new();
        if self.loads(ScenarioRelation::Exceptions) {
            let query = format!(
                "SELECT {DESCRIPTION_COLUMNS} FROM exceptions WHERE scenario_id = ANY($1) ORDER BY id"
            );
            exceptions =
                load_grouped::<DescriptionRow>(pool, &query, &ids, |r| r.scenario_id, "load exceptions")
                    .await?;
        }

        let mut restrictions = HashMap::new();
        if self.loads(ScenarioRelation::Restrictions) {
            let query = format!(
                "SELECT {DESCRIPTION_COLUMNS} FROM restrictions WHERE scenario_id = ANY($1) ORDER BY id"
            );
            restrictions = load_grouped::<DescriptionRow>(
                pool,
                &query,
                &ids,
                |r| r.scenario_id,
                "load restrictions",
            )
            .await?;
        }

        let mut resources = HashMap::new();
        if self.loads(ScenarioRelation::Resources) {
            let query = format!(
                "SELECT {RESOURCE_COLUMNS} FROM resources WHERE scenario_id = ANY($1) ORDER BY id"
            );
            resources =
                load_grouped::<ResourceRow>(pool, &query, &ids, |r| r.scenario_id, "load resources")
                    .await?;
        }

        let mut episodes = HashMap::new();
        if self.loads(ScenarioRelation::Episodes) {
            let query = format!(
                "SELECT {EPISODE_COLUMNS} FROM episodes WHERE scenario_id = ANY($1) ORDER BY position"
            );
            episodes =
                load_grouped::<EpisodeRow>(pool, &query, &ids, |r| r.scenario_id, "load episodes")
                    .await?;
        }

        let mut actors = HashMap::new();
        if self.loads(ScenarioRelation::Actors) {
            let query = "SELECT sa.scenario_id, a.id, a.name
                         FROM scenario_actors sa JOIN actors a ON a.id = sa.actor_id
                         WHERE sa.scenario_id = ANY($1) ORDER BY a.id";
            actors = load_grouped::<LinkedNamedRow>(pool, query, &ids, |r| r.scenario_id, "load actors")
                .await?;
        }

        let mut groups = HashMap::new();
        if self.loads(ScenarioRelation::Groups) {
            let query = "SELECT sg.scenario_id, g.id, g.name
                         FROM scenario_groups sg JOIN groups g ON g.id = sg.group_id
                         WHERE sg.scenario_id = ANY($1) ORDER BY g.id";
            groups = load_grouped::<LinkedNamedRow>(pool, query, &ids, |r| r.scenario_id, "load groups")
                .await?;
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut scenario = Scenario::from(row);
                scenario.context = take::<ContextRow, Context>(&mut contexts, id).pop();
                scenario.exceptions = take::<DescriptionRow, Exception>(&mut exceptions, id);
                scenario.restrictions = take::<DescriptionRow, Restriction>(&mut restrictions, id);
                scenario.resources = take::<ResourceRow, Resource>(&mut resources, id);
                scenario.episodes = take::<EpisodeRow, Episode>(&mut episodes, id);
                scenario.actors = take::<LinkedNamedRow, NamedRow>(&mut actors, id)
                    .into_iter()
                    .map(Actor::from)
                    .collect();
                scenario.groups = take::<LinkedNamedRow, NamedRow>(&mut groups, id)
                    .into_iter()
                    .map(Group::from)
                    .collect();
                scenario
            })
            .collect())
    }

    async fn insert_description(
        &self,
        table: &'static str,
        operation: &'static str,
        scenario_id: DbId,
        description: &str,
    ) -> RepoResult<DescriptionRow> {
        let query = format!(
            "INSERT INTO {table} (scenario_id, description)
             VALUES ($1, $2)
             RETURNING {DESCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, DescriptionRow>(&query)
            .bind(scenario_id)
            .bind(description)
            .fetch_one(&self.pool)
            .await
            .map_err(child_insert(operation, "Scenario", scenario_id))
    }

    /// Find or create an actor/group by name and link it to the scenario.
    async fn link_named(
        &self,
        table: &'static str,
        link_table: &'static str,
        link_column: &'static str,
        scenario_id: DbId,
        name: &str,
    ) -> RepoResult<NamedRow> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;

        let named = find_or_create_named(&mut tx, table, name).await?;
        let query = format!(
            "INSERT INTO {link_table} (scenario_id, {link_column}) VALUES ($1, $2)
             ON CONFLICT DO NOTHING"
        );
        sqlx::query(&query)
            .bind(scenario_id)
            .bind(named.id)
            .execute(&mut *tx)
            .await
            .map_err(child_insert("link to scenario", "Scenario", scenario_id))?;

        tx.commit().await.map_err(storage("commit transaction"))?;
        tracing::debug!(scenario_id, id = named.id, table, "Linked to scenario");
        Ok(named)
    }

    /// Remove a link; the actor/group itself goes once nothing links to it.
    async fn unlink_named(
        &self,
        link_table: &'static str,
        link_column: &'static str,
        entity: &'static str,
        scenario_id: DbId,
        id: DbId,
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;

        let query = format!("DELETE FROM {link_table} WHERE scenario_id = $1 AND {link_column} = $2");
        let result = sqlx::query(&query)
            .bind(scenario_id)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage("unlink from scenario"))?;
        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound { entity, id });
        }
        prune_unlinked(&mut tx).await?;

        tx.commit().await.map_err(storage("commit transaction"))
    }
}

impl Loadable<ScenarioRelation> for PgScenarioRepo {
    fn eager_relations(&self) -> &[ScenarioRelation] {
        ScenarioRelation::ALL
    }
}

#[async_trait]
impl ScenarioRepository for PgScenarioRepo {
    async fn get(&self, id: DbId) -> RepoResult<Option<Scenario>> {
        let query = format!("SELECT {COLUMNS} FROM scenarios WHERE id = $1");
        let row = sqlx::query_as::<_, ScenarioRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("find scenario"))?;
        match row {
            Some(row) => Ok(self.with_relations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, project_id: DbId) -> RepoResult<Vec<Scenario>> {
        let rows = rows_for_project(&self.pool, project_id).await?;
        self.with_relations(rows).await
    }

    async fn create(&self, input: &CreateScenario) -> RepoResult<Scenario> {
        let project_id = required_id(input.project_id, "project_id")?;
        let query = format!(
            "INSERT INTO scenarios (project_id, title, goal)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ScenarioRow>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.goal)
            .fetch_one(&self.pool)
            .await
            .map_err(child_insert("create scenario", "Project", project_id))?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &UpdateScenario) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;

        sqlx::query_scalar::<_, DbId>(
            "UPDATE scenarios SET
                title = COALESCE($2, title),
                goal = COALESCE($3, goal)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.goal)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage("update scenario"))?
        .ok_or(CoreError::NotFound { entity: "Scenario", id })?;

        if let Some(fields) = &input.context {
            upsert_context(&mut tx, id, fields).await?;
        }

        tx.commit().await.map_err(storage("commit transaction"))
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;
        delete_by_id(&mut *tx, "scenarios", "Scenario", id).await?;
        prune_unlinked(&mut tx).await?;
        tx.commit().await.map_err(storage("commit transaction"))
    }

    async fn create_exception(&self, input: &CreateException) -> RepoResult<Exception> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        self.insert_description("exceptions", "create exception", scenario_id, &input.description)
            .await
            .map(Into::into)
    }

    async fn delete_exception(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "exceptions", "Exception", id).await
    }

    async fn create_context(&self, input: &CreateContext) -> RepoResult<Context> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let mut conn = self.pool.acquire().await.map_err(storage("acquire connection"))?;
        upsert_context(&mut conn, scenario_id, &input.fields()).await
    }

    async fn delete_context(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "contexts", "Context", id).await
    }

    async fn create_restriction(&self, input: &CreateRestriction) -> RepoResult<Restriction> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        self.insert_description(
            "restrictions",
            "create restriction",
            scenario_id,
            &input.description,
        )
        .await
        .map(Into::into)
    }

    async fn delete_restriction(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "restrictions", "Restriction", id).await
    }

    async fn create_resource(&self, input: &CreateResource) -> RepoResult<Resource> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let query = format!(
            "INSERT INTO resources (scenario_id, name)
             VALUES ($1, $2)
             RETURNING {RESOURCE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ResourceRow>(&query)
            .bind(scenario_id)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(child_insert("create resource", "Scenario", scenario_id))?;
        Ok(row.into())
    }

    async fn delete_resource(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "resources", "Resource", id).await
    }

    async fn create_episode(&self, input: &CreateEpisode) -> RepoResult<Episode> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        let position = input
            .position
            .ok_or_else(|| CoreError::MissingParam("position should not be empty".into()))?;

        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;

        let scenario_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM scenarios WHERE id = $1)")
                .bind(scenario_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage("check scenario"))?;
        if !scenario_exists {
            return Err(CoreError::NotFound {
                entity: "Scenario",
                id: scenario_id,
            });
        }

        if let Some(restriction_id) = input.restriction_id {
            let owner = sqlx::query_scalar::<_, DbId>(
                "SELECT scenario_id FROM restrictions WHERE id = $1",
            )
            .bind(restriction_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(storage("check restriction"))?;
            if owner != Some(scenario_id) {
                return Err(CoreError::NotFound {
                    entity: "Restriction",
                    id: restriction_id,
                });
            }
        }

        let query = format!(
            "INSERT INTO episodes (scenario_id, position, description, type, restriction_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EPISODE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, EpisodeRow>(&query)
            .bind(scenario_id)
            .bind(position)
            .bind(&input.description)
            .bind(&input.episode_type)
            .bind(input.restriction_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| match unique_violation(&err).as_deref() {
                Some("uq_episodes_scenario_position") => CoreError::Conflict(format!(
                    "Episode position {position} is already used in scenario {scenario_id}"
                )),
                Some("uq_episodes_restriction") => CoreError::Conflict(format!(
                    "Restriction {} is already linked to an episode",
                    input.restriction_id.unwrap_or_default()
                )),
                _ => child_insert("create episode", "Scenario", scenario_id)(err),
            })?;

        tx.commit().await.map_err(storage("commit transaction"))?;
        Ok(row.into())
    }

    async fn delete_episode(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "episodes", "Episode", id).await
    }

    async fn create_actor(&self, input: &CreateActor) -> RepoResult<Actor> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        self.link_named("actors", "scenario_actors", "actor_id", scenario_id, &input.name)
            .await
            .map(Into::into)
    }

    async fn delete_actor(&self, scenario_id: DbId, actor_id: DbId) -> RepoResult<()> {
        self.unlink_named("scenario_actors", "actor_id", "Actor", scenario_id, actor_id)
            .await
    }

    async fn create_group(&self, input: &CreateGroup) -> RepoResult<Group> {
        let scenario_id = required_id(input.scenario_id, "scenario_id")?;
        self.link_named("groups", "scenario_groups", "group_id", scenario_id, &input.name)
            .await
            .map(Into::into)
    }

    async fn delete_group(&self, scenario_id: DbId, group_id: DbId) -> RepoResult<()> {
        self.unlink_named("scenario_groups", "group_id", "Group", scenario_id, group_id)
            .await
    }
}
