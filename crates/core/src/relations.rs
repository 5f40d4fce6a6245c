//! Relation capabilities for aggregates.
//!
//! Each aggregate names the relations it can carry. A repository declares
//! which of them it resolves eagerly by implementing [`Loadable`]; the
//! storage layer only loads what is declared.

use serde::Serialize;

/// Relations a [`Project`](crate::entities::project::Project) can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRelation {
    Symbols,
    Scenarios,
}

/// Relations a [`Symbol`](crate::entities::symbol::Symbol) can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolRelation {
    Synonyms,
    Impacts,
}

/// Relations a [`Scenario`](crate::entities::scenario::Scenario) can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioRelation {
    Context,
    Exceptions,
    Restrictions,
    Resources,
    Episodes,
    Actors,
    Groups,
}

impl ProjectRelation {
    pub const ALL: &'static [ProjectRelation] = &[ProjectRelation::Symbols, ProjectRelation::Scenarios];
}

impl SymbolRelation {
    pub const ALL: &'static [SymbolRelation] = &[SymbolRelation::Synonyms, SymbolRelation::Impacts];
}

impl ScenarioRelation {
    pub const ALL: &'static [ScenarioRelation] = &[
        ScenarioRelation::Context,
        ScenarioRelation::Exceptions,
        ScenarioRelation::Restrictions,
        ScenarioRelation::Resources,
        ScenarioRelation::Episodes,
        ScenarioRelation::Actors,
        ScenarioRelation::Groups,
    ];
}

/// Capability of a repository to eagerly resolve the relations `R`.
pub trait Loadable<R: Copy + PartialEq + 'static> {
    /// Relations resolved on every read.
    fn eager_relations(&self) -> &[R];

    /// Whether `relation` is resolved on read.
    fn loads(&self, relation: R) -> bool {
        self.eager_relations().contains(&relation)
    }
}
