//! Project aggregate and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::scenario::Scenario;
use crate::entities::symbol::Symbol;
use crate::types::{DbId, Timestamp};

/// A project. Owns the lexicon (symbols) and the scenarios written against it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub symbols: Vec<Symbol>,
    pub scenarios: Vec<Scenario>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateProject {
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}
