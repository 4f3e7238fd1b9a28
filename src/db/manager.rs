use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use super::migrations;

/// Database manager that owns the SQLite connection.
///
/// Every repository operation is its own short transaction; there is no
/// multi-step transaction spanning a transcript mutation and its audit entry.
pub struct Database {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl Database {
    /// Open (or create) the database at the specified path and bring the
    /// schema up to date.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let conn = Connection::open(&db_path).context("Failed to open database")?;

        // Foreign keys are off by default in SQLite; the comm_log cascade
        // depends on them.
        conn.execute_batch("PRAGMA foreign_keys = ON")
            .context("Failed to enable foreign keys")?;

        migrations::run_migrations(&conn).context("Failed to run database migrations")?;

        info!("Database initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    /// Execute a function with exclusive access to the database connection.
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock database connection: {}", e))?;
        f(&mut conn)
    }

    /// Destructively delete all transcripts and audit entries and reset both
    /// identifier sequences to 1, in a single transaction.
    pub fn clear_all_data(&self) -> Result<()> {
        self.with_connection(|conn| {
            let tx = conn
                .transaction()
                .context("Failed to begin clear-all-data transaction")?;

            tx.execute("DELETE FROM comm_log", [])
                .context("Failed to clear comm_log")?;
            tx.execute("DELETE FROM transcripts", [])
                .context("Failed to clear transcripts")?;
            // AUTOINCREMENT counters live in sqlite_sequence; removing the
            // rows restarts both tables at id 1.
            tx.execute(
                "DELETE FROM sqlite_sequence WHERE name IN ('transcripts', 'comm_log')",
                [],
            )
            .context("Failed to reset identifier sequences")?;

            tx.commit()
                .context("Failed to commit clear-all-data transaction")?;

            info!("All data cleared and identifier sequences reset");
            Ok(())
        })
    }

    /// Get the database path
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_creation() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let db = Database::open(&db_path).unwrap();
        assert!(db_path.exists());
        assert_eq!(db.db_path(), &db_path);

        // Schema should be in place
        db.with_connection(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM transcripts", [], |row| {
                row.get(0)
            })?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_reopen_existing_database() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        {
            let db = Database::open(&db_path).unwrap();
            db.create_transcript("hello").unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        let transcript = db.get_transcript(1).unwrap();
        assert!(transcript.is_some());
    }
}
