//! Row types.
//!
//! Each row mirrors one table and converts into the matching
//! `scenaria_core::entities` struct. Aggregate rows convert with empty
//! relation vectors; repositories fill in what they load.

pub mod project;
pub mod scenario;
pub mod symbol;
pub mod user;
