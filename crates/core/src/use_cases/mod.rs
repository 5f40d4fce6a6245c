//! Use-case layer.
//!
//! Each resource gets a cheaply cloneable set of use-cases holding the
//! repository contracts it needs. Every operation validates its DTO, then
//! makes a single existence-checked repository call.
//!
//! Reads report absence as `None`; updates and deletes of an aggregate
//! report it as `InvalidParam("This <entity> does not exist")`; leaf deletes
//! keep the repository's `NotFound`.

pub mod project;
pub mod scenario;
pub mod symbol;
pub mod user;

pub use project::ProjectUseCases;
pub use scenario::ScenarioUseCases;
pub use symbol::SymbolUseCases;
pub use user::UserUseCases;

use crate::error::CoreError;

/// Turn a `NotFound` for the targeted aggregate into the "does not exist" error.
pub(crate) fn does_not_exist(label: &'static str) -> impl FnOnce(CoreError) -> CoreError {
    move |err| match err {
        CoreError::NotFound { .. } => CoreError::InvalidParam(format!("This {label} does not exist")),
        other => other,
    }
}
