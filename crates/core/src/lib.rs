//! Domain core for the scenario / lexicon modeling API.
//!
//! - [`entities`] -- the entity graph (projects, symbols, scenarios, users) and DTOs.
//! - [`repository`] -- persistence contracts consumed by the use-cases.
//! - [`use_cases`] -- one operation per verb per resource.
//! - [`lexicon`] -- matching a project's lexicon against scenario text.
//! - [`memory`] -- in-process implementation of the repository contracts.

pub mod entities;
pub mod error;
pub mod lexicon;
pub mod memory;
pub mod relations;
pub mod repository;
pub mod types;
pub mod use_cases;
pub mod validation;
