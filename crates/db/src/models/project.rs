//! Project row.

use scenaria_core::entities::project::Project;
use scenaria_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            symbols: Vec::new(),
            scenarios: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
