//! Applied-migration ledger.
//!
//! One row per applied migration in a configurable table. The ledger is the
//! single source of truth for idempotence: a migration is applied iff its
//! name has a row here. The engine only ever inserts; no update or delete
//! is issued.

use crate::error::{EngineError, EngineResult};
use std::collections::HashSet;
use std::sync::Arc;
use sw_db::Database;

/// Reads and writes the set of applied migration names
pub struct Ledger {
    db: Arc<dyn Database>,
    table: String,
}

impl Ledger {
    pub fn new(db: Arc<dyn Database>, table: &str) -> Self {
        Self {
            db,
            table: table.to_string(),
        }
    }

    /// Ledger table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Names of all recorded migrations.
    ///
    /// A missing ledger table reads as an empty set so the engine tolerates
    /// a freshly provisioned database with no ledger present.
    pub async fn applied(&self) -> EngineResult<HashSet<String>> {
        if !self.db.relation_exists(&self.table).await? {
            log::debug!(
                "ledger table {} not found, treating applied set as empty",
                self.table
            );
            return Ok(HashSet::new());
        }

        let names = self
            .db
            .query_strings(&format!("SELECT name FROM {}", self.table))
            .await?;
        Ok(names.into_iter().collect())
    }

    /// Record `name` as applied, creating the ledger table on first write.
    ///
    /// The name column carries a PRIMARY KEY, so recording the same name
    /// twice is rejected by the database rather than silently duplicated.
    pub async fn record(&self, name: &str) -> EngineResult<()> {
        self.ensure_table()
            .await
            .map_err(|e| EngineError::LedgerWrite {
                migration: name.to_string(),
                message: e.to_string(),
            })?;

        let sql = format!(
            "INSERT INTO {} (name) VALUES ('{}')",
            self.table,
            name.replace('\'', "''")
        );
        self.db
            .execute(&sql)
            .await
            .map_err(|e| EngineError::LedgerWrite {
                migration: name.to_string(),
                message: e.to_string(),
            })?;

        log::debug!("recorded migration {} in {}", name, self.table);
        Ok(())
    }

    async fn ensure_table(&self) -> EngineResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    \
                name VARCHAR PRIMARY KEY,\n    \
                applied_at TIMESTAMP NOT NULL DEFAULT now()\n\
            );",
            self.table
        );
        self.db.execute_batch(&sql).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
