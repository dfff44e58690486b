//! Error types for sw-core

use thiserror::Error;

/// Core error type for Stepwise
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Migrations directory missing or not a directory
    #[error("[C003] Migrations directory not found: {path}")]
    MigrationsDirNotFound { path: String },

    /// C004: Base schema file missing
    #[error("[C004] Schema file not found: {path}")]
    SchemaFileNotFound { path: String },

    /// C005: IO error
    #[error("[C005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C006: IO error with file path context
    #[error("[C006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C007: YAML parse error
    #[error("[C007] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
