pub mod project;
pub mod scenario;
pub mod symbol;
pub mod user;
