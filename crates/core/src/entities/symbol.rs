//! Symbol aggregate (a lexicon entry), its synonyms and impacts, and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{DbId, Timestamp};

/// A lexicon symbol belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    /// Free-form classification (e.g. subject, object, verb, state).
    pub classification: String,
    pub notion: Option<String>,
    pub synonyms: Vec<Synonym>,
    pub impacts: Vec<Impact>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An alternative name for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synonym {
    pub id: DbId,
    pub symbol_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// A behavioral response (consequence) of a symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impact {
    pub id: DbId,
    pub symbol_id: DbId,
    pub description: String,
    pub created_at: Timestamp,
}

impl Symbol {
    /// The symbol name followed by its synonyms.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.synonyms.iter().map(|s| s.name.as_str()))
    }
}

/// DTO for creating a new symbol.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSymbol {
    #[validate(
        required(message = "project_id should not be empty"),
        range(min = 1, message = "project_id must be a positive integer")
    )]
    pub project_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "classification should not be empty"))]
    pub classification: String,
    pub notion: Option<String>,
}

/// DTO for updating an existing symbol. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSymbol {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "classification should not be empty"))]
    pub classification: Option<String>,
    pub notion: Option<String>,
}

/// DTO for attaching an impact to a symbol.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateImpact {
    #[validate(
        required(message = "symbol_id should not be empty"),
        range(min = 1, message = "symbol_id must be a positive integer")
    )]
    pub symbol_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
}

/// DTO for attaching a synonym to a symbol.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSynonym {
    #[validate(
        required(message = "symbol_id should not be empty"),
        range(min = 1, message = "symbol_id must be a positive integer")
    )]
    pub symbol_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}
