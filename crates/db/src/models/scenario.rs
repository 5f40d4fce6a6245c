//! Scenario rows and the rows of the records a scenario owns.

use scenaria_core::entities::scenario::{
    Actor, Context, Episode, Exception, Group, Resource, Restriction, Scenario,
};
use scenaria_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `scenarios` table.
#[derive(Debug, Clone, FromRow)]
pub struct ScenarioRow {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub goal: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ScenarioRow> for Scenario {
    fn from(row: ScenarioRow) -> Self {
        Scenario {
            id: row.id,
            project_id: row.project_id,
            title: row.title,
            goal: row.goal,
            context: None,
            exceptions: Vec::new(),
            restrictions: Vec::new(),
            resources: Vec::new(),
            episodes: Vec::new(),
            actors: Vec::new(),
            groups: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ContextRow {
    pub id: DbId,
    pub scenario_id: DbId,
    pub geographic_location: Option<String>,
    pub temporal_location: Option<String>,
    pub precondition: Option<String>,
}

impl From<ContextRow> for Context {
    fn from(row: ContextRow) -> Self {
        Context {
            id: row.id,
            scenario_id: row.scenario_id,
            geographic_location: row.geographic_location,
            temporal_location: row.temporal_location,
            precondition: row.precondition,
        }
    }
}

/// Shared shape of the `exceptions` and `restrictions` tables.
#[derive(Debug, Clone, FromRow)]
pub struct DescriptionRow {
    pub id: DbId,
    pub scenario_id: DbId,
    pub description: String,
}

impl From<DescriptionRow> for Exception {
    fn from(row: DescriptionRow) -> Self {
        Exception {
            id: row.id,
            scenario_id: row.scenario_id,
            description: row.description,
        }
    }
}

impl From<DescriptionRow> for Restriction {
    fn from(row: DescriptionRow) -> Self {
        Restriction {
            id: row.id,
            scenario_id: row.scenario_id,
            description: row.description,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ResourceRow {
    pub id: DbId,
    pub scenario_id: DbId,
    pub name: String,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            scenario_id: row.scenario_id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct EpisodeRow {
    pub id: DbId,
    pub scenario_id: DbId,
    pub position: i32,
    pub description: String,
    #[sqlx(rename = "type")]
    pub episode_type: String,
    pub restriction_id: Option<DbId>,
}

impl From<EpisodeRow> for Episode {
    fn from(row: EpisodeRow) -> Self {
        Episode {
            id: row.id,
            scenario_id: row.scenario_id,
            position: row.position,
            description: row.description,
            episode_type: row.episode_type,
            restriction_id: row.restriction_id,
        }
    }
}

/// A row from the `actors` or `groups` table.
#[derive(Debug, Clone, FromRow)]
pub struct NamedRow {
    pub id: DbId,
    pub name: String,
}

/// An actor or group joined through its scenario link table.
#[derive(Debug, Clone, FromRow)]
pub struct LinkedNamedRow {
    pub scenario_id: DbId,
    pub id: DbId,
    pub name: String,
}

impl From<NamedRow> for Actor {
    fn from(row: NamedRow) -> Self {
        Actor {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<NamedRow> for Group {
    fn from(row: NamedRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<LinkedNamedRow> for NamedRow {
    fn from(row: LinkedNamedRow) -> Self {
        NamedRow {
            id: row.id,
            name: row.name,
        }
    }
}
