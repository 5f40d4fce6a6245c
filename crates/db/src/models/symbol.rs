//! Symbol, synonym and impact rows.

use scenaria_core::entities::symbol::{Impact, Symbol, Synonym};
use scenaria_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `symbols` table.
#[derive(Debug, Clone, FromRow)]
pub struct SymbolRow {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub classification: String,
    pub notion: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SymbolRow> for Symbol {
    fn from(row: SymbolRow) -> Self {
        Symbol {
            id: row.id,
            project_id: row.project_id,
            name: row.name,
            classification: row.classification,
            notion: row.notion,
            synonyms: Vec::new(),
            impacts: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct SynonymRow {
    pub id: DbId,
    pub symbol_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

impl From<SynonymRow> for Synonym {
    fn from(row: SynonymRow) -> Self {
        Synonym {
            id: row.id,
            symbol_id: row.symbol_id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ImpactRow {
    pub id: DbId,
    pub symbol_id: DbId,
    pub description: String,
    pub created_at: Timestamp,
}

impl From<ImpactRow> for Impact {
    fn from(row: ImpactRow) -> Self {
        Impact {
            id: row.id,
            symbol_id: row.symbol_id,
            description: row.description,
            created_at: row.created_at,
        }
    }
}
