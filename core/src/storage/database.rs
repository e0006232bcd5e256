use crate::{Error, Result};
use rusqlite::Connection as SqliteConnection;
use std::path::{Path, PathBuf};

pub type Connection = SqliteConnection;

const SCHEMA: &str = include_str!("../../schema.sql");

/// SQLite file that backs durable storefront state
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open a connection to an existing database, adding any missing tables
    pub fn connect(&self) -> Result<Connection> {
        let conn = SqliteConnection::open(&self.db_path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }

    /// Create the database file and initialize the schema
    pub fn create(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = SqliteConnection::open(&self.db_path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = %self.db_path.display(), "initialized storefront database");

        Ok(conn)
    }

    pub fn exists(&self) -> bool {
        self.db_path.exists()
    }

    /// Connect if the file exists, otherwise create it
    pub fn get_or_create(&self) -> Result<Connection> {
        if self.exists() {
            self.connect()
        } else {
            self.create()
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    pub fn get_schema_version(&self, conn: &Connection) -> Result<i32> {
        let version: String = conn.query_row(
            "SELECT value FROM metadata WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )?;

        version
            .parse::<i32>()
            .map_err(|_| Error::InvalidInput("Invalid schema version".to_string()))
    }

    /// Copy the database file to `backup_path`
    pub fn backup<P: AsRef<Path>>(&self, backup_path: P) -> Result<()> {
        std::fs::copy(&self.db_path, backup_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_creation() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("state.db");

        let db = Database::new(&db_path);
        assert!(!db.exists());

        let conn = db.create().unwrap();
        assert!(db.exists());
        assert_eq!(db.get_schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn test_create_makes_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("state.db");

        let db = Database::new(&db_path);
        db.create().unwrap();
        assert!(db.exists());
    }

    #[test]
    fn test_get_or_create() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("state.db"));

        let _conn1 = db.get_or_create().unwrap();
        assert!(db.exists());

        let conn2 = db.get_or_create().unwrap();
        assert_eq!(db.get_schema_version(&conn2).unwrap(), 1);
    }

    #[test]
    fn test_connect_initializes_existing_empty_file() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("state.db");
        std::fs::write(&db_path, b"").unwrap();

        let db = Database::new(&db_path);
        assert!(db.exists());

        let conn = db.get_or_create().unwrap();
        assert_eq!(db.get_schema_version(&conn).unwrap(), 1);
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn test_backup() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("state.db");
        let backup_path = dir.path().join("backup.db");

        let db = Database::new(&db_path);
        db.create().unwrap();

        db.backup(&backup_path).unwrap();
        assert!(backup_path.exists());
    }
}
