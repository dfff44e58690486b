//! New command implementation - scaffold the next migration directory

use anyhow::{bail, Context, Result};
use std::fs;
use sw_core::{discover_all, ordinal_key};

use crate::cli::{GlobalArgs, NewArgs};
use crate::context::RuntimeContext;

const TEMPLATE: &str = "-- Add your schema changes here\n";

/// Execute the new command
pub async fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let migrations_dir = ctx.config.migrations_dir_absolute(&ctx.root);

    let name = args.name.trim();
    if name.is_empty() || name.contains(std::path::is_separator) {
        bail!("migration name must be a plain directory name");
    }

    let migrations = discover_all(&migrations_dir)?;
    let next = migrations
        .iter()
        .map(|m| ordinal_key(&m.name).0)
        .max()
        .unwrap_or(0)
        + 1;

    let dir_name = format!("{}-{}", next, name.replace(' ', "-").to_lowercase());
    let dir = migrations_dir.join(&dir_name);
    if dir.exists() {
        bail!("migration directory {} already exists", dir.display());
    }

    fs::create_dir(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let step = dir.join("01_up.sql");
    fs::write(&step, TEMPLATE).with_context(|| format!("Failed to write {}", step.display()))?;

    println!("Created {}", step.display());
    Ok(())
}
