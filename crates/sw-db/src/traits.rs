//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for Stepwise
///
/// One implementation per supported backend. The orchestrator holds a
/// `dyn Database` and never names a concrete backend type.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Whether the target database is already provisioned.
    /// Must not have side effects.
    async fn exists(&self) -> DbResult<bool>;

    /// Create the target database with no schema objects.
    /// Fails loudly if it already exists or creation is rejected.
    async fn create(&self) -> DbResult<()>;

    /// Establish the session used by all subsequent operations in the run.
    /// Operations also connect lazily on first use, so calling this is an
    /// eager-validation convenience, not a requirement.
    async fn connect(&self) -> DbResult<()>;

    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute one or more statements as a single batch, verbatim.
    /// Statement splitting is the backend's concern, not the engine's.
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Execute a query and return the first column of each row as text
    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
