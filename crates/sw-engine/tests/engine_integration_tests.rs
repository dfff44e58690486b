//! Integration tests for the migration engine against real DuckDB targets.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use sw_core::{Config, DatabaseConfig, DbType};
use sw_db::{Database, DuckDbBackend};
use sw_engine::{EngineError, Orchestrator};

fn project_config(db_path: &str) -> Config {
    Config {
        database: DatabaseConfig {
            db_type: DbType::DuckDb,
            path: db_path.to_string(),
            user: None,
            password: None,
            host: None,
            port: None,
        },
        migrations_dir: "migrations".to_string(),
        schema_file: "schema.sql".to_string(),
        migration_table: "stepwise_migrations".to_string(),
    }
}

fn write_migration(root: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = root.join("migrations").join(name);
    fs::create_dir_all(&dir).unwrap();
    for (file, content) in files {
        fs::write(dir.join(file), content).unwrap();
    }
}

/// Standard fixture: base schema plus three migrations named to exercise
/// numeric-prefix ordering.
fn setup_project(root: &Path) {
    fs::write(
        root.join("schema.sql"),
        "CREATE TABLE base (id INTEGER, marker VARCHAR);",
    )
    .unwrap();
    fs::create_dir_all(root.join("migrations")).unwrap();

    write_migration(
        root,
        "2-users",
        &[("01_create.sql", "CREATE TABLE users (id INTEGER, name VARCHAR);")],
    );
    write_migration(
        root,
        "10-orders",
        &[("01_create.sql", "CREATE TABLE orders (id INTEGER);")],
    );
    write_migration(
        root,
        "1-audit",
        &[(
            "01_create.sql",
            "CREATE TABLE audit (note VARCHAR); INSERT INTO audit VALUES ('init');",
        )],
    );
}

fn orchestrator(root: &Path, db: &Arc<dyn Database>, dry_run: bool) -> Orchestrator {
    let config = project_config(root.join("app.duckdb").to_str().unwrap());
    Orchestrator::new(Arc::clone(db), &config, root, dry_run)
}

fn file_db(root: &Path) -> Arc<dyn Database> {
    Arc::new(DuckDbBackend::new(
        root.join("app.duckdb").to_str().unwrap(),
    ))
}

#[tokio::test]
async fn test_full_run_provisions_and_applies_in_order() {
    let dir = tempfile::tempdir().unwrap();
    setup_project(dir.path());
    let db = file_db(dir.path());

    let summary = orchestrator(dir.path(), &db, false).run().await.unwrap();

    assert!(summary.provisioned);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.applied, vec!["1-audit", "2-users", "10-orders"]);

    // Base schema and all migration effects are present.
    assert!(db.relation_exists("base").await.unwrap());
    assert!(db.relation_exists("audit").await.unwrap());
    assert!(db.relation_exists("users").await.unwrap());
    assert!(db.relation_exists("orders").await.unwrap());

    // Ledger holds exactly one row per migration.
    let names = db
        .query_strings("SELECT name FROM stepwise_migrations ORDER BY name")
        .await
        .unwrap();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    setup_project(dir.path());
    let db = file_db(dir.path());

    orchestrator(dir.path(), &db, false).run().await.unwrap();
    let second = orchestrator(dir.path(), &db, false).run().await.unwrap();

    assert!(!second.provisioned);
    assert!(second.applied.is_empty());
    assert_eq!(second.skipped, 3);

    let names = db
        .query_strings("SELECT name FROM stepwise_migrations")
        .await
        .unwrap();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn test_new_migration_picked_up_on_next_run() {
    let dir = tempfile::tempdir().unwrap();
    setup_project(dir.path());
    let db = file_db(dir.path());

    orchestrator(dir.path(), &db, false).run().await.unwrap();

    write_migration(
        dir.path(),
        "11-cleanup",
        &[("01_drop.sql", "DROP TABLE orders;")],
    );
    let summary = orchestrator(dir.path(), &db, false).run().await.unwrap();

    assert_eq!(summary.applied, vec!["11-cleanup"]);
    assert_eq!(summary.skipped, 3);
    assert!(!db.relation_exists("orders").await.unwrap());
}

#[tokio::test]
async fn test_partial_failure_halts_forward_progress() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("schema.sql"), "").unwrap();
    write_migration(
        dir.path(),
        "1-a",
        &[("01_ok.sql", "CREATE TABLE a (id INTEGER);")],
    );
    write_migration(
        dir.path(),
        "2-b",
        &[
            ("01_ok.sql", "CREATE TABLE b (id INTEGER);"),
            ("02_bad.sql", "THIS IS NOT SQL;"),
        ],
    );
    write_migration(
        dir.path(),
        "3-c",
        &[("01_ok.sql", "CREATE TABLE c (id INTEGER);")],
    );

    let db = file_db(dir.path());
    let err = orchestrator(dir.path(), &db, false).run().await.unwrap_err();

    // The error identifies the failing migration and step.
    match err {
        EngineError::StepFailed {
            migration, step, ..
        } => {
            assert_eq!(migration, "2-b");
            assert_eq!(step, "02_bad.sql");
        }
        other => panic!("expected StepFailed, got {other}"),
    }

    // A recorded; B not recorded despite its first step committing; C never
    // attempted.
    let names = db
        .query_strings("SELECT name FROM stepwise_migrations")
        .await
        .unwrap();
    assert_eq!(names, vec!["1-a".to_string()]);
    assert!(db.relation_exists("b").await.unwrap());
    assert!(!db.relation_exists("c").await.unwrap());

    // Retry resumes from the ledger: B re-attempted from its first step.
    let err = orchestrator(dir.path(), &db, false).run().await.unwrap_err();
    assert!(matches!(err, EngineError::StepFailed { .. }));
}

#[tokio::test]
async fn test_dry_run_has_no_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    setup_project(dir.path());
    let db = file_db(dir.path());

    // Provision the database out-of-band so three migrations are pending.
    db.create().await.unwrap();
    db.execute_batch("CREATE TABLE base (id INTEGER, marker VARCHAR);")
        .await
        .unwrap();

    let summary = orchestrator(dir.path(), &db, true).run().await.unwrap();

    // The plan covers all three migrations...
    assert_eq!(summary.applied, vec!["1-audit", "2-users", "10-orders"]);

    // ...but nothing was executed or recorded.
    assert!(!db.relation_exists("stepwise_migrations").await.unwrap());
    assert!(!db.relation_exists("audit").await.unwrap());
    assert!(!db.relation_exists("users").await.unwrap());
    assert!(!db.relation_exists("orders").await.unwrap());
}

#[tokio::test]
async fn test_dry_run_does_not_create_database() {
    let dir = tempfile::tempdir().unwrap();
    setup_project(dir.path());
    let db = file_db(dir.path());

    let summary = orchestrator(dir.path(), &db, true).run().await.unwrap();

    assert!(!summary.provisioned);
    assert_eq!(summary.applied.len(), 3);
    assert!(!dir.path().join("app.duckdb").exists());
}

#[tokio::test]
async fn test_empty_migration_records_with_no_effect() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("schema.sql"), "").unwrap();
    fs::create_dir_all(dir.path().join("migrations").join("1-empty")).unwrap();

    let db = file_db(dir.path());
    let summary = orchestrator(dir.path(), &db, false).run().await.unwrap();

    assert_eq!(summary.applied, vec!["1-empty"]);
    let names = db
        .query_strings("SELECT name FROM stepwise_migrations")
        .await
        .unwrap();
    assert_eq!(names, vec!["1-empty".to_string()]);
}

#[tokio::test]
async fn test_status_reports_applied_and_pending() {
    let dir = tempfile::tempdir().unwrap();
    setup_project(dir.path());
    let db = file_db(dir.path());

    // Before any run, against a missing database: all pending, no file.
    let status = orchestrator(dir.path(), &db, false).status().await.unwrap();
    assert_eq!(status.len(), 3);
    assert!(status.iter().all(|(_, applied)| !applied));
    assert!(!dir.path().join("app.duckdb").exists());

    orchestrator(dir.path(), &db, false).run().await.unwrap();
    write_migration(dir.path(), "11-later", &[]);

    let status = orchestrator(dir.path(), &db, false).status().await.unwrap();
    let view: Vec<(&str, bool)> = status
        .iter()
        .map(|(m, applied)| (m.name.as_str(), *applied))
        .collect();
    assert_eq!(
        view,
        vec![
            ("1-audit", true),
            ("2-users", true),
            ("10-orders", true),
            ("11-later", false),
        ]
    );
}

#[cfg(unix)]
mod script_steps {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn write_executable(root: &Path, migration: &str, name: &str, body: &str) {
        let dir = root.join("migrations").join(migration);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[tokio::test]
    async fn test_script_stdout_runs_through_engine_session() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schema.sql"), "").unwrap();
        write_migration(
            dir.path(),
            "1-seed",
            &[("01_create.sql", "CREATE TABLE audit (note VARCHAR);")],
        );
        write_executable(
            dir.path(),
            "1-seed",
            "02_seed.sh",
            "#!/bin/sh\necho \"INSERT INTO audit VALUES ('from ${STEPWISE_STEP} of ${STEPWISE_MIGRATION}');\"\n",
        );

        let db = file_db(dir.path());
        orchestrator(dir.path(), &db, false).run().await.unwrap();

        let notes = db
            .query_strings("SELECT note FROM audit")
            .await
            .unwrap();
        assert_eq!(notes, vec!["from 02_seed.sh of 1-seed".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_script_aborts_migration() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schema.sql"), "").unwrap();
        write_migration(
            dir.path(),
            "1-seed",
            &[("01_create.sql", "CREATE TABLE audit (note VARCHAR);")],
        );
        write_executable(
            dir.path(),
            "1-seed",
            "02_fail.sh",
            "#!/bin/sh\necho doomed >&2\nexit 7\n",
        );

        let db = file_db(dir.path());
        let err = orchestrator(dir.path(), &db, false).run().await.unwrap_err();

        match err {
            EngineError::StepFailed {
                migration,
                step,
                source,
            } => {
                assert_eq!(migration, "1-seed");
                assert_eq!(step, "02_fail.sh");
                assert!(matches!(*source, EngineError::Subprocess { code: 7, .. }));
            }
            other => panic!("expected StepFailed, got {other}"),
        }

        // The failed migration is not recorded.
        assert!(!db.relation_exists("stepwise_migrations").await.unwrap());
    }

    #[tokio::test]
    async fn test_dry_run_skips_scripts_entirely() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("schema.sql"), "").unwrap();
        let out_file = dir.path().join("ran.txt");
        write_executable(
            dir.path(),
            "1-seed",
            "01_touch.sh",
            &format!("#!/bin/sh\ntouch {}\n", out_file.display()),
        );

        let db = file_db(dir.path());
        db.create().await.unwrap();

        orchestrator(dir.path(), &db, true).run().await.unwrap();
        assert!(!out_file.exists());
    }
}
