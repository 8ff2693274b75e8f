//! SQLite-backed per-day completion persistence.
//!
//! One row per day holding the completed reminder ids as a JSON array.
//! Unknown days load as empty, which is also how a fresh day starts.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::data_dir;
use crate::error::{CoreError, StorageError};
use crate::progress::{CompletionState, CompletionStore};

/// SQLite completion store at `~/.config/waterline/completions.db`.
pub struct CompletionDb {
    conn: Connection,
}

impl CompletionDb {
    /// Open the completion database, creating the schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("completions.db");
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory store, for tests and ephemeral embedding.
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS completions (
                day TEXT PRIMARY KEY,
                ids TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl CompletionStore for CompletionDb {
    fn load(&self, day: NaiveDate) -> Result<CompletionState, StorageError> {
        let row: Option<String> = self
            .conn
            .query_row(
                "SELECT ids FROM completions WHERE day = ?1",
                params![day.to_string()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(json) = row else {
            return Ok(CompletionState::new());
        };
        match serde_json::from_str::<Vec<String>>(&json) {
            Ok(ids) => Ok(CompletionState::from_ids(ids)),
            Err(e) => {
                log::warn!("discarding corrupt completion row for {day}: {e}");
                Ok(CompletionState::new())
            }
        }
    }

    fn save(&mut self, day: NaiveDate, state: &CompletionState) -> Result<(), StorageError> {
        let json = serde_json::to_string(&state.completed_ids())
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO completions (day, ids) VALUES (?1, ?2)",
            params![day.to_string(), json],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn unknown_day_loads_empty() {
        let db = CompletionDb::open_memory().unwrap();
        assert!(db.load(day()).unwrap().is_empty());
    }

    #[test]
    fn save_and_reload() {
        let mut db = CompletionDb::open_memory().unwrap();
        let mut state = CompletionState::new();
        state.toggle("a");
        state.toggle("b");
        db.save(day(), &state).unwrap();

        let loaded = db.load(day()).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn days_do_not_leak() {
        let mut db = CompletionDb::open_memory().unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        db.save(day(), &CompletionState::from_ids(["a"])).unwrap();

        assert!(db.load(other).unwrap().is_empty());
    }

    #[test]
    fn corrupt_row_reads_as_empty() {
        let mut db = CompletionDb::open_memory().unwrap();
        db.conn
            .execute(
                "INSERT INTO completions (day, ids) VALUES (?1, 'not json')",
                params![day().to_string()],
            )
            .unwrap();
        assert!(db.load(day()).unwrap().is_empty());
        // And a save repairs the row.
        db.save(day(), &CompletionState::from_ids(["a"])).unwrap();
        assert!(db.load(day()).unwrap().is_completed("a"));
    }
}
