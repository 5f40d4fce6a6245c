//! Symbol use-cases, including the impact and synonym sub-resources.

use std::sync::Arc;

use crate::entities::symbol::{
    CreateImpact, CreateSymbol, CreateSynonym, Impact, Symbol, Synonym, UpdateSymbol,
};
use crate::error::CoreError;
use crate::repository::SymbolRepository;
use crate::types::DbId;
use crate::use_cases::does_not_exist;
use crate::validation::validate;

#[derive(Clone)]
pub struct SymbolUseCases {
    repo: Arc<dyn SymbolRepository>,
}

impl SymbolUseCases {
    pub fn new(repo: Arc<dyn SymbolRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: DbId) -> Result<Option<Symbol>, CoreError> {
        self.repo.get(id).await
    }

    /// All symbols of a project; empty when the project has none.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, project_id: DbId) -> Result<Vec<Symbol>, CoreError> {
        self.repo.list(project_id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &CreateSymbol) -> Result<Symbol, CoreError> {
        validate(input)?;
        let symbol = self.repo.create(input).await?;
        tracing::info!(symbol_id = symbol.id, project_id = symbol.project_id, "Symbol created");
        Ok(symbol)
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: DbId, input: &UpdateSymbol) -> Result<(), CoreError> {
        validate(input)?;
        self.repo
            .update(id, input)
            .await
            .map_err(does_not_exist("symbol"))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete(id).await.map_err(does_not_exist("symbol"))
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_impact(&self, input: &CreateImpact) -> Result<Impact, CoreError> {
        validate(input)?;
        self.repo.create_impact(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_impact(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_impact(id).await
    }

    #[tracing::instrument(skip_all)]
    pub async fn create_synonym(&self, input: &CreateSynonym) -> Result<Synonym, CoreError> {
        validate(input)?;
        self.repo.create_synonym(input).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_synonym(&self, id: DbId) -> Result<(), CoreError> {
        self.repo.delete_synonym(id).await
    }
}
