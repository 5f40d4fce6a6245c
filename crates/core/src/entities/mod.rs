//! Entity graph model and DTOs.
//!
//! Each submodule contains:
//! - `Serialize` entity structs for an aggregate and the children it owns
//! - `Deserialize` + `Validate` create DTOs
//! - `Deserialize` + `Validate` update DTOs (all `Option` fields) for partial merges

pub mod project;
pub mod scenario;
pub mod symbol;
pub mod user;
