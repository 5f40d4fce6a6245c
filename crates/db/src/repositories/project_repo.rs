//! Repository for the `projects` table.

use async_trait::async_trait;
use scenaria_core::entities::project::{CreateProject, Project, UpdateProject};
use scenaria_core::error::CoreError;
use scenaria_core::relations::{Loadable, ProjectRelation};
use scenaria_core::repository::{ProjectRepository, RepoResult};
use scenaria_core::types::DbId;
use sqlx::PgPool;

use crate::error::storage;
use crate::models::project::ProjectRow;
use crate::repositories::{scenario_repo, symbol_repo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// PostgreSQL-backed [`ProjectRepository`].
///
/// `get` loads the project's symbols and scenarios without their own
/// relations; `list` returns bare projects.
#[derive(Clone)]
pub struct PgProjectRepo {
    pool: PgPool,
}

impl PgProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loadable<ProjectRelation> for PgProjectRepo {
    fn eager_relations(&self) -> &[ProjectRelation] {
        ProjectRelation::ALL
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepo {
    async fn get(&self, id: DbId) -> RepoResult<Option<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("find project"))?
        else {
            return Ok(None);
        };

        let mut project = Project::from(row);
        if self.loads(ProjectRelation::Symbols) {
            project.symbols = symbol_repo::rows_for_project(&self.pool, id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
        }
        if self.loads(ProjectRelation::Scenarios) {
            project.scenarios = scenario_repo::rows_for_project(&self.pool, id)
                .await?
                .into_iter()
                .map(Into::into)
                .collect();
        }
        Ok(Some(project))
    }

    async fn list(&self) -> RepoResult<Vec<Project>> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id");
        let rows = sqlx::query_as::<_, ProjectRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(storage("list projects"))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, input: &CreateProject) -> RepoResult<Project> {
        let query = format!(
            "INSERT INTO projects (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await
            .map_err(storage("create project"))?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &UpdateProject) -> RepoResult<()> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE projects SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage("update project"))?
        .map(|_| ())
        .ok_or(CoreError::NotFound { entity: "Project", id })
    }

    /// Cascades to symbols and scenarios, then prunes unlinked actors/groups.
    async fn delete(&self, id: DbId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(storage("begin transaction"))?;
        super::delete_by_id(&mut *tx, "projects", "Project", id).await?;
        super::prune_unlinked(&mut tx).await?;
        tx.commit().await.map_err(storage("commit transaction"))
    }
}
