//! sw-core - Core library for Stepwise
//!
//! Shared types used across all Stepwise components: project configuration,
//! run verbosity, the migration data model, and filesystem discovery with
//! numeric-prefix ordering.

pub mod config;
pub mod error;
pub mod migration;
pub mod verbosity;

pub use config::{Config, DatabaseConfig, DbType};
pub use error::{CoreError, CoreResult};
pub use migration::{
    compare_names, discover_all, discover_pending, ordinal_key, Migration, Step, StepKind,
};
pub use verbosity::Verbosity;
