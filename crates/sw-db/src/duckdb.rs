//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend.
///
/// The target is a database file (or `:memory:`). Construction performs no
/// I/O; the session is acquired lazily on first use and held for the rest
/// of the run.
pub struct DuckDbBackend {
    path: String,
    conn: Mutex<Option<Connection>>,
}

impl DuckDbBackend {
    /// Create a backend for `path` without touching the filesystem
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            conn: Mutex::new(None),
        }
    }

    /// Target path this backend points at
    pub fn path(&self) -> &str {
        &self.path
    }

    fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }

    fn open(&self) -> DbResult<Connection> {
        let conn = if self.is_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(Path::new(&self.path))
        }
        .map_err(|e| DbError::ConnectionError(format!("{}: {}", e, self.path)))?;
        Ok(conn)
    }

    fn exists_sync(&self) -> bool {
        if self.is_memory() {
            // An in-memory target exists exactly while its session does.
            self.conn.lock().unwrap().is_some()
        } else {
            Path::new(&self.path).exists()
        }
    }

    /// Run `f` against the session, opening it first if needed
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let mut guard = self.conn.lock().unwrap();
        if guard.is_none() {
            *guard = Some(self.open()?);
        }
        match guard.as_ref() {
            Some(conn) => f(conn),
            None => Err(DbError::Internal(
                "connection slot empty after open".to_string(),
            )),
        }
    }

    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };

        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            schema, table
        );

        self.with_conn(|conn| {
            let count: i64 = conn
                .query_row(&sql, [], |row| row.get(0))
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            Ok(count > 0)
        })
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn exists(&self) -> DbResult<bool> {
        Ok(self.exists_sync())
    }

    async fn create(&self) -> DbResult<()> {
        if self.exists_sync() {
            return Err(DbError::AlreadyExists(self.path.clone()));
        }
        let conn = self
            .open()
            .map_err(|e| DbError::CreateError(e.to_string()))?;
        *self.conn.lock().unwrap() = Some(conn);
        Ok(())
    }

    async fn connect(&self) -> DbResult<()> {
        self.with_conn(|_| Ok(()))
    }

    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.with_conn(|conn| {
            conn.execute(sql, [])
                .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
        })
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.with_conn(|conn| {
            conn.execute_batch(sql)
                .map_err(|e| DbError::ExecutionError(e.to_string()))
        })
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn query_strings(&self, sql: &str) -> DbResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn
                .prepare(sql)
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;

            let mut values = Vec::new();
            for row in rows {
                values.push(row.map_err(|e| DbError::ExecutionError(e.to_string()))?);
            }
            Ok(values)
        })
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}
