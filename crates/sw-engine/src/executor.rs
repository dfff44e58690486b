//! Step executor: runs one migration's steps strictly in order.
//!
//! A `.sql` step is handed verbatim to the database's batch entry point; an
//! executable step runs as an external process with `STEPWISE_*` context in
//! its environment, and anything it prints to stdout is executed as SQL
//! through the run's own session. A failed step aborts the migration
//! immediately; effects already committed stay in place.

use crate::error::{EngineError, EngineResult};
use crate::subprocess;
use std::sync::Arc;
use sw_core::{Migration, Step, StepKind};
use sw_db::Database;

/// Read-only execution context borrowed by the step executor for one run
pub struct RunContext {
    pub db: Arc<dyn Database>,
    /// Target database path, exported to scripts as STEPWISE_DATABASE
    pub database_path: String,
    /// Ledger table name, exported to scripts as STEPWISE_TABLE
    pub migration_table: String,
    pub dry_run: bool,
}

/// Execute all steps of `migration` in order.
///
/// Under dry-run every step is logged and skipped; nothing reaches the
/// database or spawns a process.
pub async fn run_migration(migration: &Migration, ctx: &RunContext) -> EngineResult<()> {
    for step in &migration.steps {
        if ctx.dry_run {
            log::info!("dry-run: would apply {}/{}", migration.name, step.name);
            continue;
        }

        log::debug!("applying {}/{}", migration.name, step.name);
        let result = match step.kind {
            StepKind::Sql => apply_sql(ctx, step).await,
            StepKind::Script => apply_script(ctx, migration, step).await,
        };

        result.map_err(|e| EngineError::StepFailed {
            migration: migration.name.clone(),
            step: step.name.clone(),
            source: Box::new(e),
        })?;
    }
    Ok(())
}

async fn apply_sql(ctx: &RunContext, step: &Step) -> EngineResult<()> {
    ctx.db.execute_batch(&step.content).await?;
    Ok(())
}

async fn apply_script(ctx: &RunContext, migration: &Migration, step: &Step) -> EngineResult<()> {
    let envs = vec![
        ("STEPWISE_DATABASE".to_string(), ctx.database_path.clone()),
        ("STEPWISE_TABLE".to_string(), ctx.migration_table.clone()),
        ("STEPWISE_MIGRATION".to_string(), migration.name.clone()),
        ("STEPWISE_STEP".to_string(), step.name.clone()),
    ];

    let output = subprocess::run_script(&step.path, &envs).await?;
    if !output.stderr.trim().is_empty() {
        log::debug!("{}/{} stderr:\n{}", migration.name, step.name, output.stderr.trim_end());
    }

    // Script stdout is SQL executed through the run's own session, so a
    // script reaches the database without racing the engine for the file.
    let sql = output.stdout.trim();
    if !sql.is_empty() {
        ctx.db.execute_batch(sql).await?;
    }
    Ok(())
}
