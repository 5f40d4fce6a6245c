//! Scenario aggregate, the records it owns, and DTOs.
//!
//! A scenario owns at most one [`Context`], any number of exceptions,
//! restrictions, resources and episodes, and is associated many-to-many
//! with actors and groups.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::lexicon::LexiconMatch;
use crate::types::{DbId, Timestamp};

/// A scenario belonging to a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub goal: String,
    pub context: Option<Context>,
    pub exceptions: Vec<Exception>,
    pub restrictions: Vec<Restriction>,
    pub resources: Vec<Resource>,
    /// Ordered by position.
    pub episodes: Vec<Episode>,
    pub actors: Vec<Actor>,
    pub groups: Vec<Group>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Where and when a scenario takes place, and what must hold beforehand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    pub id: DbId,
    pub scenario_id: DbId,
    pub geographic_location: Option<String>,
    pub temporal_location: Option<String>,
    pub precondition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exception {
    pub id: DbId,
    pub scenario_id: DbId,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restriction {
    pub id: DbId,
    pub scenario_id: DbId,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub scenario_id: DbId,
    pub name: String,
}

/// One step of a scenario. `position` is unique within the scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Episode {
    pub id: DbId,
    pub scenario_id: DbId,
    pub position: i32,
    pub description: String,
    #[serde(rename = "type")]
    pub episode_type: String,
    pub restriction_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: DbId,
    pub name: String,
}

/// A scenario together with the project symbols its text mentions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioWithLexicons {
    #[serde(flatten)]
    pub scenario: Scenario,
    pub lexicons: Vec<LexiconMatch>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new scenario.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateScenario {
    #[validate(
        required(message = "project_id should not be empty"),
        range(min = 1, message = "project_id must be a positive integer")
    )]
    pub project_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "goal should not be empty"))]
    pub goal: String,
}

/// Context fields, used when updating a scenario.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContextFields {
    pub geographic_location: Option<String>,
    pub temporal_location: Option<String>,
    pub precondition: Option<String>,
}

/// DTO for updating an existing scenario. All fields are optional.
///
/// When `context` is present it replaces the scenario's context (creating
/// one if the scenario had none).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateScenario {
    #[validate(length(min = 1, message = "title should not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "goal should not be empty"))]
    pub goal: Option<String>,
    pub context: Option<ContextFields>,
}

/// DTO for setting the context of a scenario.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateContext {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    pub geographic_location: Option<String>,
    pub temporal_location: Option<String>,
    pub precondition: Option<String>,
}

impl CreateContext {
    pub fn fields(&self) -> ContextFields {
        ContextFields {
            geographic_location: self.geographic_location.clone(),
            temporal_location: self.temporal_location.clone(),
            precondition: self.precondition.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateException {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateRestriction {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateResource {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}

/// DTO for adding an episode to a scenario.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateEpisode {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    #[validate(
        required(message = "position should not be empty"),
        range(min = 1, message = "position must be a positive integer")
    )]
    pub position: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, message = "description should not be empty"))]
    pub description: String,
    #[serde(default, rename = "type")]
    #[validate(length(min = 1, message = "type should not be empty"))]
    pub episode_type: String,
    /// Restriction of the same scenario that constrains this episode.
    pub restriction_id: Option<DbId>,
}

/// DTO for associating an actor (found or created by name) with a scenario.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateActor {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}

/// DTO for associating a group (found or created by name) with a scenario.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateGroup {
    #[validate(
        required(message = "scenario_id should not be empty"),
        range(min = 1, message = "scenario_id must be a positive integer")
    )]
    pub scenario_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: String,
}
