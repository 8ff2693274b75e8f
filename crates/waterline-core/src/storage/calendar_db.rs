//! SQLite-backed calendar store for reminder events.
//!
//! Events are keyed by calendar day. Identifiers are UUIDs minted on
//! insert; replacement of a day's water reminders runs in one transaction
//! so a retried schedule never leaves a partial double set behind.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::data_dir;
use crate::calendar::{water_title, EventStore, ReminderEvent, ReminderSlot, WATER_TITLE_PREFIX};
use crate::error::{CoreError, StorageError};

/// SQLite event store at `~/.config/waterline/calendar.db`.
pub struct CalendarDb {
    conn: Connection,
}

impl CalendarDb {
    /// Open the calendar database, creating the schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("calendar.db");
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
            "CREATE TABLE IF NOT EXISTS events (
                id        TEXT PRIMARY KEY,
                day       TEXT NOT NULL,
                title     TEXT NOT NULL,
                start_at  TEXT NOT NULL,
                end_at    TEXT NOT NULL,
                amount_ml INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_day ON events(day);
            CREATE INDEX IF NOT EXISTS idx_events_day_start ON events(day, start_at);",
        )?;
        Ok(())
    }
}

/// Parse datetime from RFC3339 with fallback to the epoch for corrupt rows.
fn parse_datetime(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH)
}

fn row_to_event(row: &rusqlite::Row) -> Result<ReminderEvent, rusqlite::Error> {
    let start_at: String = row.get(2)?;
    let end_at: String = row.get(3)?;
    Ok(ReminderEvent {
        id: row.get(0)?,
        title: row.get(1)?,
        start_time: parse_datetime(&start_at),
        end_time: parse_datetime(&end_at),
        amount_ml: row.get(4)?,
    })
}

impl EventStore for CalendarDb {
    fn list_events(&self, day: NaiveDate) -> Result<Vec<ReminderEvent>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, start_at, end_at, amount_ml
             FROM events WHERE day = ?1 ORDER BY start_at",
        )?;
        let rows = stmt.query_map(params![day.to_string()], row_to_event)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }

    fn replace_events(
        &mut self,
        day: NaiveDate,
        slots: &[ReminderSlot],
    ) -> Result<usize, StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM events WHERE day = ?1 AND title LIKE ?2",
            params![day.to_string(), format!("{WATER_TITLE_PREFIX}%")],
        )?;
        for slot in slots {
            tx.execute(
                "INSERT INTO events (id, day, title, start_at, end_at, amount_ml)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    Uuid::new_v4().to_string(),
                    day.to_string(),
                    water_title(slot.amount_ml),
                    slot.start_time.to_rfc3339(),
                    slot.end_time.to_rfc3339(),
                    slot.amount_ml,
                ],
            )?;
        }
        tx.commit()?;
        Ok(slots.len())
    }

    fn remove_events_matching(
        &mut self,
        day: NaiveDate,
        title_prefix: &str,
    ) -> Result<usize, StorageError> {
        let removed = self.conn.execute(
            "DELETE FROM events WHERE day = ?1 AND title LIKE ?2",
            params![day.to_string(), format!("{title_prefix}%")],
        )?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate_day;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn replace_mints_unique_ids_and_orders_by_start() {
        let mut db = CalendarDb::open_memory().unwrap();
        let slots = allocate_day(2.0, day());
        let created = db.replace_events(day(), &slots).unwrap();
        assert_eq!(created, 12);

        let events = db.list_events(day()).unwrap();
        assert_eq!(events.len(), 12);
        let mut ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
        for pair in events.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
        }
    }

    #[test]
    fn rescheduling_does_not_duplicate() {
        let mut db = CalendarDb::open_memory().unwrap();
        db.replace_events(day(), &allocate_day(2.0, day())).unwrap();
        db.replace_events(day(), &allocate_day(2.0, day())).unwrap();

        let events = db.list_events(day()).unwrap();
        assert_eq!(events.len(), 12);
        let total: u32 = events.iter().map(|e| e.amount_ml).sum();
        assert_eq!(total, 2000);
    }

    #[test]
    fn days_are_isolated() {
        let mut db = CalendarDb::open_memory().unwrap();
        let other = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        db.replace_events(day(), &allocate_day(1.0, day())).unwrap();
        db.replace_events(other, &allocate_day(2.0, other)).unwrap();

        assert_eq!(db.list_events(day()).unwrap().len(), 12);
        let total: u32 = db
            .list_events(day())
            .unwrap()
            .iter()
            .map(|e| e.amount_ml)
            .sum();
        assert_eq!(total, 1000);
    }

    #[test]
    fn remove_matching_only_touches_tagged_events() {
        let mut db = CalendarDb::open_memory().unwrap();
        db.replace_events(day(), &allocate_day(1.0, day())).unwrap();
        // A foreign event on the same calendar day.
        db.conn
            .execute(
                "INSERT INTO events (id, day, title, start_at, end_at, amount_ml)
                 VALUES ('x', ?1, 'Dentist', '2025-06-01T13:00:00+00:00',
                         '2025-06-01T14:00:00+00:00', 0)",
                params![day().to_string()],
            )
            .unwrap();

        let removed = db.remove_events_matching(day(), WATER_TITLE_PREFIX).unwrap();
        assert_eq!(removed, 12);
        let remaining = db.list_events(day()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "Dentist");
    }
}
