//! Repository layer.
//!
//! Each repository owns a clone of the pool and implements one of the
//! `scenaria_core::repository` contracts. Relations are fetched in one
//! query per relation for the whole batch of parents (`= ANY($1)`), and only
//! for the relations the repository declares through `Loadable`.

use std::collections::HashMap;

use scenaria_core::error::CoreError;
use scenaria_core::types::DbId;
use sqlx::{PgConnection, PgExecutor};

use crate::error::storage;

pub mod project_repo;
pub mod scenario_repo;
pub mod symbol_repo;
pub mod user_repo;

pub use project_repo::PgProjectRepo;
pub use scenario_repo::PgScenarioRepo;
pub use symbol_repo::PgSymbolRepo;
pub use user_repo::PgUserRepo;

/// Bucket child rows by their parent id, preserving query order.
pub(crate) fn group_by_parent<T>(rows: Vec<T>, parent: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut groups: HashMap<DbId, Vec<T>> = HashMap::new();
    for row in rows {
        groups.entry(parent(&row)).or_default().push(row);
    }
    groups
}

/// Delete a row by id, reporting `NotFound` for `entity` when nothing was removed.
///
/// `table` is always a compile-time constant.
pub(crate) async fn delete_by_id<'e>(
    executor: impl PgExecutor<'e>,
    table: &'static str,
    entity: &'static str,
    id: DbId,
) -> Result<(), CoreError> {
    let query = format!("DELETE FROM {table} WHERE id = $1 RETURNING id");
    sqlx::query_scalar::<_, DbId>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(storage("delete row"))?
        .map(|_| ())
        .ok_or(CoreError::NotFound { entity, id })
}

/// Delete actors and groups that no scenario links to any more.
///
/// Runs inside the transaction that removed the last link.
pub(crate) async fn prune_unlinked(conn: &mut PgConnection) -> Result<(), CoreError> {
    sqlx::query(
        "DELETE FROM actors a
         WHERE NOT EXISTS (SELECT 1 FROM scenario_actors sa WHERE sa.actor_id = a.id)",
    )
    .execute(&mut *conn)
    .await
    .map_err(storage("prune actors"))?;
    sqlx::query(
        "DELETE FROM groups g
         WHERE NOT EXISTS (SELECT 1 FROM scenario_groups sg WHERE sg.group_id = g.id)",
    )
    .execute(&mut *conn)
    .await
    .map_err(storage("prune groups"))?;
    Ok(())
}
