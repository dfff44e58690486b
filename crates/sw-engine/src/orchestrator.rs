//! Run orchestration.
//!
//! One run walks `EnsureProvisioned -> DiscoverPending -> ApplyMigration*`
//! sequentially: provision the database from the base schema if it does not
//! exist, then apply each pending migration in order, recording it in the
//! ledger as it completes. The first fatal error ends the run; a later
//! re-invocation resumes from the ledger's current applied set.

use crate::error::{EngineError, EngineResult};
use crate::executor::{self, RunContext};
use crate::ledger::Ledger;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sw_core::{discover_all, discover_pending, Config, Migration};
use sw_db::Database;

/// What one run did
#[derive(Debug)]
pub struct RunSummary {
    /// Whether this run created the database
    pub provisioned: bool,

    /// Migrations applied by this run, in order (or that would be applied,
    /// under dry-run)
    pub applied: Vec<String>,

    /// Migrations already recorded before the run started
    pub skipped: usize,
}

/// Composes provisioning, discovery, step execution, and the ledger for
/// one run. Owns the run configuration and the database session lifetime.
pub struct Orchestrator {
    db: Arc<dyn Database>,
    ledger: Ledger,
    migrations_dir: PathBuf,
    schema_file: PathBuf,
    database_path: String,
    migration_table: String,
    dry_run: bool,
}

impl Orchestrator {
    pub fn new(db: Arc<dyn Database>, config: &Config, root: &Path, dry_run: bool) -> Self {
        Self {
            ledger: Ledger::new(Arc::clone(&db), &config.migration_table),
            migrations_dir: config.migrations_dir_absolute(root),
            schema_file: config.schema_file_absolute(root),
            database_path: config.database.path.clone(),
            migration_table: config.migration_table.clone(),
            dry_run,
            db,
        }
    }

    /// Bring the database from its current state to fully migrated
    pub async fn run(&self) -> EngineResult<RunSummary> {
        let existed = self.db.exists().await?;
        let provisioned = if existed {
            log::info!("database {} already exists, skipping provisioning", self.database_path);
            false
        } else {
            self.provision().await?
        };

        // Connecting to a missing target would create it as a side effect,
        // so a dry run against an unprovisioned database plans against an
        // empty applied set without touching the target.
        let applied = if !existed && !provisioned {
            HashSet::new()
        } else {
            self.db.connect().await?;
            self.ledger.applied().await?
        };

        let pending = discover_pending(&self.migrations_dir, &applied)?;
        if pending.is_empty() {
            log::info!(
                "nothing to apply, {} migration(s) already recorded",
                applied.len()
            );
        }

        let ctx = RunContext {
            db: Arc::clone(&self.db),
            database_path: self.database_path.clone(),
            migration_table: self.migration_table.clone(),
            dry_run: self.dry_run,
        };

        let mut summary = RunSummary {
            provisioned,
            applied: Vec::new(),
            skipped: applied.len(),
        };

        for migration in &pending {
            if self.dry_run {
                log::info!(
                    "dry-run: would apply migration {} ({} step(s))",
                    migration.name,
                    migration.steps.len()
                );
            } else {
                log::info!("applying migration {}", migration.name);
            }

            executor::run_migration(migration, &ctx).await?;

            if !self.dry_run {
                self.ledger.record(&migration.name).await?;
            }
            summary.applied.push(migration.name.clone());
        }

        Ok(summary)
    }

    /// Every discovered migration with its applied state, in execution order
    pub async fn status(&self) -> EngineResult<Vec<(Migration, bool)>> {
        // Reading status against a missing database must not create it.
        let applied = if self.db.exists().await? {
            self.db.connect().await?;
            self.ledger.applied().await?
        } else {
            HashSet::new()
        };

        Ok(discover_all(&self.migrations_dir)?
            .into_iter()
            .map(|m| {
                let is_applied = applied.contains(&m.name);
                (m, is_applied)
            })
            .collect())
    }

    /// Create the database and execute the base schema through the same
    /// declarative path used for `.sql` steps.
    async fn provision(&self) -> EngineResult<bool> {
        if self.dry_run {
            log::info!(
                "dry-run: would create database {} and apply base schema {}",
                self.database_path,
                self.schema_file.display()
            );
            return Ok(false);
        }

        log::info!(
            "creating database {} from base schema {}",
            self.database_path,
            self.schema_file.display()
        );
        self.db
            .create()
            .await
            .map_err(|e| EngineError::Provisioning(e.to_string()))?;

        let schema = std::fs::read_to_string(&self.schema_file).map_err(|e| {
            EngineError::Provisioning(format!(
                "failed to read {}: {}",
                self.schema_file.display(),
                e
            ))
        })?;

        if !schema.trim().is_empty() {
            self.db
                .execute_batch(&schema)
                .await
                .map_err(|e| EngineError::Provisioning(e.to_string()))?;
        }

        Ok(true)
    }
}
