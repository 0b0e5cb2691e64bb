use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use tempfile::env::temp_dir;

use crate::storage::table::Table;

pub fn get_unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis()
}

pub fn create_temp_db_path() -> PathBuf {
    let mut temp_path = temp_dir();
    temp_path.push(format!("lontar_test_{}.db", get_unix_timestamp_millis()));
    temp_path
}

pub fn create_temp_db_path_with_prefix(prefix: &str) -> PathBuf {
    let mut temp_path = temp_dir();
    temp_path.push(format!(
        "{}_{}_{}.db",
        prefix,
        std::process::id(),
        get_unix_timestamp_millis()
    ));
    temp_path
}

/// Temp database file plus an optional open table, removed on drop.
pub struct TempDatabase {
    pub path: PathBuf,
    pub table: Option<Table>,
}

impl TempDatabase {
    pub fn new() -> Self {
        Self {
            path: create_temp_db_path(),
            table: None,
        }
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            path: create_temp_db_path_with_prefix(prefix),
            table: None,
        }
    }

    pub fn open_table(&mut self) -> Result<&mut Table, Box<dyn std::error::Error>> {
        let table = Table::open(&self.path)?;
        self.table = Some(table);
        Ok(self.table.as_mut().unwrap())
    }

    /// Flushes and closes the currently open table, keeping the file around
    /// so a later `open_table` sees the persisted rows.
    pub fn close_table(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(table) = self.table.take() {
            table.close()?;
        }
        Ok(())
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        self.table = None;
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
