use std::path::Path;

use rusqlite::{Connection, OpenFlags};

pub mod genomes;
pub mod rows;
pub mod schema;
pub mod sequences;

use crate::error::{ReportError, Result};
use schema::Schema;

/// Read-only handle on the annotation database plus its validated schema.
/// Every data-access function takes this by reference.
#[derive(Debug)]
pub struct Database {
    pub conn: Connection,
    pub schema: Schema,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database not found: {}", path.display()),
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::info!(path = %path.display(), "opened annotation database");
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        let schema = Schema::load(&conn)?;
        schema.validate()?;
        Ok(Self { conn, schema })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/fixtures.rs"]
pub mod fixtures;

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
