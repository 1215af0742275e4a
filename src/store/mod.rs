//! Storage layer for Loupe.
//!
//! Provides a trait-based interface over the underlying SQLite database so
//! the batch pipeline and the web handlers can be tested against scripted
//! stores.

mod mock;
mod sqlite;
mod types;

pub use mock::MockStore;
pub use sqlite::SqliteStore;
pub use types::{QueryOutput, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Trait defining the interface to the SQL store.
///
/// All operations are async and return Results with LoupeError.
#[async_trait]
pub trait SqlStore: Send + Sync {
    /// Executes a statement that returns no rows; yields the affected-row count.
    async fn exec(&self, sql: &str) -> Result<u64>;

    /// Executes a row-returning statement and collects columns and rows.
    async fn query(&self, sql: &str) -> Result<QueryOutput>;

    /// Toggles referential-integrity enforcement on the store's connection.
    async fn set_foreign_keys(&self, enabled: bool) -> Result<()>;

    /// Lists the names of all user tables, ordered by name.
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Returns true if a table with the given name exists.
    async fn table_exists(&self, name: &str) -> Result<bool>;

    /// Closes the underlying connection.
    async fn close(&self);
}
