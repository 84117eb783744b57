use rusqlite::Connection;
use std::path::Path;
use crate::errors::ReportError;
use tracing::debug;

pub const IN_MEMORY: &str = ":memory:";

/// Owned handle to the product store. One per run; released by [`Database::close`]
/// or on drop.
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    pub fn open(path: &str) -> Result<Self, ReportError> {
        if path == IN_MEMORY {
            return Self::in_memory();
        }

        // Ensure parent directory exists
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ReportError::Database(format!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| ReportError::Database(format!("Failed to open database: {}", e)))?;
        debug!(path, "Opened product store");
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, ReportError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ReportError::Database(format!("Failed to open in-memory db: {}", e)))?;
        Ok(Self { conn })
    }

    /// Drop and recreate the product table.
    pub fn reset_schema(&self) -> Result<(), ReportError> {
        self.conn.execute_batch(super::schema::RESET_TABLES)
            .map_err(|e| ReportError::Database(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    pub fn close(self) -> Result<(), ReportError> {
        self.conn.close()
            .map_err(|(_, e)| ReportError::Database(format!("Failed to close database: {}", e)))
    }
}
