//! Error types for sw-engine

use sw_core::CoreError;
use sw_db::DbError;
use thiserror::Error;

/// Orchestration errors. All variants are fatal for the current run; there
/// is no retry at any level.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Database creation or base-schema execution failed (M001).
    /// No migrations were attempted.
    #[error("[M001] Provisioning failed: {0}")]
    Provisioning(String),

    /// A step aborted its migration (M002). The migration is not recorded
    /// as applied; a retry re-attempts it from the start.
    #[error("[M002] Migration '{migration}' failed at step '{step}': {source}")]
    StepFailed {
        migration: String,
        step: String,
        #[source]
        source: Box<EngineError>,
    },

    /// External command exited non-zero or could not be spawned (M003).
    /// `code` is -1 when the process was signal-terminated or never ran.
    #[error("[M003] Command '{command}' exited with code {code}: {stderr}")]
    Subprocess {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// The post-success ledger insert failed (M004). The migration's
    /// effects are applied but unrecorded; the ledger no longer matches
    /// the database and needs operator intervention.
    #[error("[M004] Migration '{migration}' applied but not recorded: {message}")]
    LedgerWrite { migration: String, message: String },

    /// Database collaborator error
    #[error(transparent)]
    Db(#[from] DbError),

    /// Configuration or discovery error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
