//! Status command implementation - list migrations and their applied state

use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use sw_engine::Orchestrator;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::context::RuntimeContext;

#[derive(Serialize)]
struct StatusRow<'a> {
    name: &'a str,
    applied: bool,
    steps: usize,
}

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let orchestrator = Orchestrator::new(Arc::clone(&ctx.db), &ctx.config, &ctx.root, false);
    let status = orchestrator.status().await?;

    let rows: Vec<StatusRow> = status
        .iter()
        .map(|(migration, applied)| StatusRow {
            name: &migration.name,
            applied: *applied,
            steps: migration.steps.len(),
        })
        .collect();

    match args.output {
        StatusOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        StatusOutput::Table => {
            if rows.is_empty() {
                println!("No migrations found");
                return Ok(());
            }

            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in &rows {
                let state = if row.applied { "applied" } else { "pending" };
                println!(
                    "{:width$}  {}  ({} step(s))",
                    row.name,
                    state,
                    row.steps,
                    width = width
                );
            }

            let pending = rows.iter().filter(|r| !r.applied).count();
            println!("\n{} migration(s), {} pending", rows.len(), pending);
        }
    }

    Ok(())
}
