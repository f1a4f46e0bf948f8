#![allow(dead_code)]

use gradedesk::config::Config;
use gradedesk::db::{NewStudent, Store, Student};
use tempfile::TempDir;

/// Store backed by a scratch directory. Keep the guard alive for the
/// duration of the test or the database file disappears.
pub fn temp_store() -> (TempDir, Store) {
    let dir = TempDir::new().expect("create temp dir");
    let config = Config {
        data_dir: dir.path().to_path_buf(),
        log_filter: "info".to_string(),
    };
    (dir, Store::new(&config))
}

pub fn new_student(name: &str, age: i64, subject: &str, marks: i64) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        age,
        subject: subject.to_string(),
        marks,
    }
}

pub fn find(rows: &[Student], id: i64) -> Option<&Student> {
    rows.iter().find(|s| s.id == id)
}
