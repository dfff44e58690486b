//! Migration data model and filesystem discovery.
//!
//! A migration is one subdirectory of the migrations directory; its steps
//! are the files inside it. Both levels are ordered by the numeric-prefix
//! comparator so `2-add-index` sorts before `10-cleanup`.

use crate::error::{CoreError, CoreResult};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What a step file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Declarative statements, passed verbatim to the database as one batch
    Sql,
    /// Executable script, run as an external process
    Script,
}

/// One file within a migration
#[derive(Debug, Clone)]
pub struct Step {
    /// File base name, used for ordering and error reporting
    pub name: String,

    /// Absolute path on disk
    pub path: PathBuf,

    /// Kind derived from the file extension (`.sql` vs anything else)
    pub kind: StepKind,

    /// Raw file content
    pub content: String,
}

/// One named, ordered batch of schema/data changes
#[derive(Debug, Clone)]
pub struct Migration {
    /// Directory base name; the ledger key
    pub name: String,

    /// Steps in execution order
    pub steps: Vec<Step>,
}

/// Split a name into its leading numeric prefix and the remaining suffix.
///
/// Names without a numeric prefix get prefix 0, as does a digit run too
/// long for u64.
pub fn ordinal_key(name: &str) -> (u64, &str) {
    let digits = name.len() - name.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let prefix = name[..digits].parse::<u64>().unwrap_or(0);
    (prefix, &name[digits..])
}

/// Numeric-prefix-aware comparison: numeric on the prefix, lexicographic on
/// the suffix, full name as the final tie-break so distinct names never
/// compare equal (`01-x` vs `1-x`).
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (num_a, suffix_a) = ordinal_key(a);
    let (num_b, suffix_b) = ordinal_key(b);
    num_a
        .cmp(&num_b)
        .then_with(|| suffix_a.cmp(suffix_b))
        .then_with(|| a.cmp(b))
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// List every migration under `dir` in execution order, regardless of
/// applied state.
pub fn discover_all(dir: &Path) -> CoreResult<Vec<Migration>> {
    if !dir.is_dir() {
        return Err(CoreError::MigrationsDirNotFound {
            path: dir.display().to_string(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut migrations = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if is_hidden(&name) || !path.is_dir() {
            continue;
        }
        migrations.push(load_migration(name, &path)?);
    }

    migrations.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(migrations)
}

/// List unapplied migrations under `dir` in execution order.
///
/// A directory with nothing pending yields an empty list, never an error.
pub fn discover_pending(dir: &Path, applied: &HashSet<String>) -> CoreResult<Vec<Migration>> {
    let pending: Vec<Migration> = discover_all(dir)?
        .into_iter()
        .filter(|m| !applied.contains(&m.name))
        .collect();

    log::debug!(
        "discovered {} pending migration(s) in {}",
        pending.len(),
        dir.display()
    );
    Ok(pending)
}

/// Materialize one migration from its directory.
///
/// A directory with zero step files is a valid, empty migration.
fn load_migration(name: String, dir: &Path) -> CoreResult<Migration> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut steps = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(file_name) => file_name.to_string(),
            None => continue,
        };
        if is_hidden(&file_name) || !path.is_file() {
            continue;
        }

        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;

        let kind = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("sql") => StepKind::Sql,
            _ => StepKind::Script,
        };

        steps.push(Step {
            name: file_name,
            path,
            kind,
            content,
        });
    }

    steps.sort_by(|a, b| compare_names(&a.name, &b.name));
    Ok(Migration { name, steps })
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
