//! Repository for the `symbols`, `synonyms` and `impacts` tables.

use async_trait::async_trait;
use scenaria_core::entities::symbol::{
    CreateImpact, CreateSymbol, CreateSynonym, Impact, Symbol, Synonym, UpdateSymbol,
};
use scenaria_core::error::CoreError;
use scenaria_core::relations::{Loadable, SymbolRelation};
use scenaria_core::repository::{required_id, RepoResult, SymbolRepository};
use scenaria_core::types::DbId;
use sqlx::PgPool;

use crate::error::{child_insert, storage};
use crate::models::symbol::{ImpactRow, SymbolRow, SynonymRow};
use crate::repositories::{delete_by_id, group_by_parent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, classification, notion, created_at, updated_at";
const SYNONYM_COLUMNS: &str = "id, symbol_id, name, created_at";
const IMPACT_COLUMNS: &str = "id, symbol_id, description, created_at";

/// Symbols of a project without their relations, in creation order.
pub(crate) async fn rows_for_project(pool: &PgPool, project_id: DbId) -> RepoResult<Vec<SymbolRow>> {
    let query = format!("SELECT {COLUMNS} FROM symbols WHERE project_id = $1 ORDER BY id");
    sqlx::query_as::<_, SymbolRow>(&query)
        .bind(project_id)
        .fetch_all(pool)
        .await
        .map_err(storage("list symbols"))
}

/// PostgreSQL-backed [`SymbolRepository`]. Reads resolve synonyms and impacts.
#[derive(Clone)]
pub struct PgSymbolRepo {
    pool: PgPool,
}

impl PgSymbolRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach the declared relations to a batch of symbol rows.
    async fn with_relations(&self, rows: Vec<SymbolRow>) -> RepoResult<Vec<Symbol>> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();

        let mut synonyms = if self.loads(SymbolRelation::Synonyms) && !ids.is_empty() {
            let query = format!(
                "SELECT {SYNONYM_COLUMNS} FROM synonyms WHERE symbol_id = ANY($1) ORDER BY id"
            );
            let rows = sqlx::query_as::<_, SynonymRow>(&query)
                .bind(&ids[..])
                .fetch_all(&self.pool)
                .await
                .map_err(storage("load synonyms"))?;
            group_by_parent(rows, |r| r.symbol_id)
        } else {
            Default::default()
        };

        let mut impacts = if self.loads(SymbolRelation::Impacts) && !ids.is_empty() {
            let query = format!(
                "SELECT {IMPACT_COLUMNS} FROM impacts WHERE symbol_id = ANY($1) ORDER BY id"
            );
            let rows = sqlx::query_as::<_, ImpactRow>(&query)
                .bind(&ids[..])
                .fetch_all(&self.pool)
                .await
                .map_err(storage("load impacts"))?;
            group_by_parent(rows, |r| r.symbol_id)
        } else {
            Default::default()
        };

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut symbol = Symbol::from(row);
                symbol.synonyms = synonyms
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect();
                symbol.impacts = impacts
                    .remove(&id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect();
                symbol
            })
            .collect())
    }
}

impl Loadable<SymbolRelation> for PgSymbolRepo {
    fn eager_relations(&self) -> &[SymbolRelation] {
        SymbolRelation::ALL
    }
}

#[async_trait]
impl SymbolRepository for PgSymbolRepo {
    async fn get(&self, id: DbId) -> RepoResult<Option<Symbol>> {
        let query = format!("SELECT {COLUMNS} FROM symbols WHERE id = $1");
        let row = sqlx::query_as::<_, SymbolRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage("find symbol"))?;
        match row {
            Some(row) => Ok(self.with_relations(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, project_id: DbId) -> RepoResult<Vec<Symbol>> {
        let rows = rows_for_project(&self.pool, project_id).await?;
        self.with_relations(rows).await
    }

    async fn create(&self, input: &CreateSymbol) -> RepoResult<Symbol> {
        let project_id = required_id(input.project_id, "project_id")?;
        let query = format!(
            "INSERT INTO symbols (project_id, name, classification, notion)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, SymbolRow>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.classification)
            .bind(&input.notion)
            .fetch_one(&self.pool)
            .await
            .map_err(child_insert("create symbol", "Project", project_id))?;
        Ok(row.into())
    }

    async fn update(&self, id: DbId, input: &UpdateSymbol) -> RepoResult<()> {
        sqlx::query_scalar::<_, DbId>(
            "UPDATE symbols SET
                name = COALESCE($2, name),
                classification = COALESCE($3, classification),
                notion = COALESCE($4, notion)
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.classification)
        .bind(&input.notion)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage("update symbol"))?
        .map(|_| ())
        .ok_or(CoreError::NotFound { entity: "Symbol", id })
    }

    async fn delete(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "symbols", "Symbol", id).await
    }

    async fn create_impact(&self, input: &CreateImpact) -> RepoResult<Impact> {
        let symbol_id = required_id(input.symbol_id, "symbol_id")?;
        let query = format!(
            "INSERT INTO impacts (symbol_id, description)
             VALUES ($1, $2)
             RETURNING {IMPACT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ImpactRow>(&query)
            .bind(symbol_id)
            .bind(&input.description)
            .fetch_one(&self.pool)
            .await
            .map_err(child_insert("create impact", "Symbol", symbol_id))?;
        Ok(row.into())
    }

    async fn delete_impact(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "impacts", "Impact", id).await
    }

    async fn create_synonym(&self, input: &CreateSynonym) -> RepoResult<Synonym> {
        let symbol_id = required_id(input.symbol_id, "symbol_id")?;
        let query = format!(
            "INSERT INTO synonyms (symbol_id, name)
             VALUES ($1, $2)
             RETURNING {SYNONYM_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SynonymRow>(&query)
            .bind(symbol_id)
            .bind(&input.name)
            .fetch_one(&self.pool)
            .await
            .map_err(child_insert("create synonym", "Symbol", symbol_id))?;
        Ok(row.into())
    }

    async fn delete_synonym(&self, id: DbId) -> RepoResult<()> {
        delete_by_id(&self.pool, "synonyms", "Synonym", id).await
    }
}
