//! Configuration types and parsing for stepwise.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main project configuration from stepwise.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Target database connection
    pub database: DatabaseConfig,

    /// Directory containing one subdirectory per migration
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Base schema file, executed once when the database is first provisioned
    #[serde(default = "default_schema_file")]
    pub schema_file: String,

    /// Ledger table recording applied migration names
    pub migration_table: String,
}

/// Database type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// Embedded DuckDB file (or :memory:)
    #[default]
    DuckDb,
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Backend type
    #[serde(rename = "type", default)]
    pub db_type: DbType,

    /// Database path (file path, or ":memory:" for tests)
    pub path: String,

    /// Connection credentials, used only by server backends. The embedded
    /// DuckDB backend ignores all four.
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_schema_file() -> String {
    "schema.sql".to_string()
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for stepwise.yml or stepwise.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("stepwise.yml");
        let yaml_path = dir.join("stepwise.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: dir.join("stepwise.yml").display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.database.path.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "database.path cannot be empty".to_string(),
            });
        }

        if self.migration_table.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migration_table cannot be empty".to_string(),
            });
        }

        // The ledger table name is interpolated into SQL text, so it must
        // be a plain (optionally schema-qualified) identifier.
        let valid_table = self
            .migration_table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
            && !self.migration_table.starts_with(|c: char| c.is_ascii_digit());
        if !valid_table {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "migration_table '{}' is not a valid identifier",
                    self.migration_table
                ),
            });
        }

        if self.migrations_dir.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if self.schema_file.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "schema_file cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Migrations directory resolved against the project root
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Schema file resolved against the project root
    pub fn schema_file_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.schema_file)
    }

    /// Check that the configured paths exist on disk.
    ///
    /// Called before any database contact so a bad path never leaves a
    /// half-provisioned target behind.
    pub fn ensure_paths(&self, root: &Path) -> CoreResult<()> {
        let migrations_dir = self.migrations_dir_absolute(root);
        if !migrations_dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: migrations_dir.display().to_string(),
            });
        }

        let schema_file = self.schema_file_absolute(root);
        if !schema_file.is_file() {
            return Err(CoreError::SchemaFileNotFound {
                path: schema_file.display().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
