//! Up command implementation - apply pending migrations

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use sw_engine::Orchestrator;

use crate::cli::{GlobalArgs, UpArgs};
use crate::context::RuntimeContext;

/// Execute the up command
pub async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let start_time = Instant::now();
    let ctx = RuntimeContext::new(global)?;

    let orchestrator = Orchestrator::new(
        Arc::clone(&ctx.db),
        &ctx.config,
        &ctx.root,
        args.dry_run,
    );
    let summary = orchestrator.run().await?;

    let duration = start_time.elapsed();

    if summary.provisioned {
        println!("Provisioned database {}", ctx.config.database.path);
    }

    if summary.applied.is_empty() {
        println!(
            "Nothing to apply ({} migration(s) already recorded)",
            summary.skipped
        );
    } else if args.dry_run {
        println!("Would apply {} migration(s):", summary.applied.len());
        for name in &summary.applied {
            println!("  - {}", name);
        }
    } else {
        for name in &summary.applied {
            println!("  ✓ {}", name);
        }
        println!("\nApplied {} migration(s)", summary.applied.len());
    }

    println!("Total time: {}ms", duration.as_millis());
    Ok(())
}
