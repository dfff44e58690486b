//! Runtime context for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sw_core::Config;
use sw_db::{Database, DuckDbBackend};

use crate::cli::GlobalArgs;

/// Loaded configuration plus the database handle for one invocation
pub struct RuntimeContext {
    /// The loaded project configuration
    pub config: Config,

    /// Project root directory
    pub root: PathBuf,

    /// Database handle; the session is acquired lazily by the run
    pub db: Arc<dyn Database>,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        // Load config from custom path or project directory
        let mut config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        if let Some(target) = &args.target {
            config.database.path = target.clone();
        }

        // Fail on bad paths before any database contact.
        config.ensure_paths(&root).context("Invalid project layout")?;

        log::debug!("target database: {}", config.database.path);
        let db: Arc<dyn Database> = Arc::new(DuckDbBackend::new(&config.database.path));

        Ok(Self { config, root, db })
    }
}
