//! SQLite-backed skill vocabulary store

use crate::error::{MiniAtsError, Result};
use crate::processing::vocabulary::{SkillCategory, SkillRow, SkillSource};
use log::info;
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS skills (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    category TEXT NOT NULL
)";

/// Read-only view of a `skills(name, category)` table.
///
/// Every fetch opens its own read-only connection, so the source is `Sync`
/// and never creates a database file.
#[derive(Debug, Clone)]
pub struct SqliteSkillSource {
    path: PathBuf,
}

impl SqliteSkillSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        if !self.path.exists() {
            return Err(MiniAtsError::VocabularyUnavailable(format!(
                "skill database not found at {} (run `mini-ats skills init`)",
                self.path.display()
            )));
        }

        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| unavailable(&self.path, e))
    }
}

impl SkillSource for SqliteSkillSource {
    fn fetch_rows(&self) -> Result<Vec<SkillRow>> {
        let conn = self.open()?;
        read_rows(&conn).map_err(|e| unavailable(&self.path, e))
    }
}

fn unavailable(path: &Path, err: rusqlite::Error) -> MiniAtsError {
    MiniAtsError::VocabularyUnavailable(format!("{}: {}", path.display(), err))
}

fn read_rows(conn: &Connection) -> rusqlite::Result<Vec<SkillRow>> {
    let mut stmt = conn.prepare("SELECT name, category FROM skills")?;
    let rows = stmt.query_map([], |row| {
        Ok(SkillRow {
            name: row.get::<_, String>(0)?,
            category: row.get::<_, String>(1)?,
        })
    })?;
    let skills = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(skills)
}

/// Writable skill catalog, used to seed and maintain the database
pub struct SkillCatalog {
    conn: Connection,
}

impl SkillCatalog {
    /// Open (creating if needed) a file-backed catalog
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory catalog (for testing)
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn add(&self, name: &str, category: SkillCategory) -> Result<()> {
        self.conn.execute(
            "INSERT INTO skills (name, category) VALUES (?1, ?2)",
            params![name.trim().to_lowercase(), category.as_str()],
        )?;
        Ok(())
    }

    /// Insert raw rows as given, in one transaction. Returns the row count.
    pub fn insert_rows(&mut self, rows: &[SkillRow]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("INSERT INTO skills (name, category) VALUES (?1, ?2)")?;
            for row in rows {
                stmt.execute(params![row.name, row.category])?;
            }
        }
        tx.commit()?;
        info!("Inserted {} skill rows", rows.len());
        Ok(rows.len())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM skills", [])?;
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM skills", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SkillSource for SkillCatalog {
    fn fetch_rows(&self) -> Result<Vec<SkillRow>> {
        read_rows(&self.conn)
            .map_err(|e| MiniAtsError::VocabularyUnavailable(e.to_string()))
    }
}
