use rusqlite::{params, Connection};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::notice::Notice;

/// Marks at or above this count as a pass.
pub const PASS_MARK: i64 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub subject: String,
    pub marks: i64,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub subject: String,
    pub marks: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Pass,
    Fail,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pass => write!(f, "Pass"),
            Status::Fail => write!(f, "Fail"),
        }
    }
}

impl Student {
    /// Derived only; never stored.
    pub fn status(&self) -> Status {
        if self.marks >= PASS_MARK {
            Status::Pass
        } else {
            Status::Fail
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database connection failed: {0}")]
    Connectivity(#[source] rusqlite::Error),
    #[error("database query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Handle to the backing table. Holds only the database path: every operation
/// opens its own connection and drops it before returning. No pooling.
#[derive(Debug, Clone)]
pub struct Store {
    db_path: PathBuf,
}

impl Store {
    pub fn new(config: &Config) -> Self {
        Self {
            db_path: config.db_path(),
        }
    }

    /// Connection-acquisition boundary: anything failing here is a
    /// connectivity error and the requested operation is abandoned.
    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.db_path).map_err(StoreError::Connectivity)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS students(
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                subject TEXT NOT NULL,
                marks INTEGER NOT NULL
            )",
            [],
        )
        .map_err(StoreError::Connectivity)?;
        Ok(conn)
    }

    pub fn add_student(&self, new: &NewStudent) -> Result<Notice, StoreError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO students(name, age, subject, marks) VALUES (?1, ?2, ?3, ?4)",
            params![new.name, new.age, new.subject, new.marks],
        )?;
        tracing::info!(name = %new.name, subject = %new.subject, "student added");
        Ok(Notice::success(format!(
            "Student {} added successfully",
            new.name
        )))
    }

    /// Full table in store-default (rowid) order.
    pub fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name, age, subject, marks FROM students")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Student {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    age: row.get(2)?,
                    subject: row.get(3)?,
                    marks: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Overwrites marks for the matching row. A missing id is a silent no-op
    /// and still reports success; see DESIGN.md.
    pub fn update_marks(&self, id: i64, marks: i64) -> Result<Notice, StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE students SET marks = ?1 WHERE id = ?2",
            params![marks, id],
        )?;
        if changed == 0 {
            tracing::warn!(id, "update matched no row");
        } else {
            tracing::info!(id, marks, "marks updated");
        }
        Ok(Notice::success("Marks updated successfully"))
    }

    /// Removes the matching row; silent no-op on a missing id.
    pub fn delete_student(&self, id: i64) -> Result<Notice, StoreError> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
        if changed == 0 {
            tracing::warn!(id, "delete matched no row");
        } else {
            tracing::info!(id, "student deleted");
        }
        Ok(Notice::warning("Student record deleted"))
    }
}
