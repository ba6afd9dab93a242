//! Storage layer for equipment status events.
//!
//! Provides persistence for operator-entered status changes using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! Open one `Database` per thread, or wrap it in a `Mutex<Database>`.
//!
//! # Schema
//!
//! Rows keep the raw strings that forms and imports submit:
//! - `date`: `YYYY-MM-DD`
//! - `time`: `HH:MM` on the plant's local clock
//! - `status`: a status string understood by [`es_core::Status`]
//!
//! Rows are returned in insertion order (`rowid`). The interval engine sorts
//! by instant with a stable sort, so insertion order is the tie-break for
//! events recorded at the same minute.
//!
//! Rows are validated when read, not when written. A malformed row is skipped
//! by [`Database::status_events`] so one bad record never hides the rest.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use es_core::{EventError, StatusEvent};
use rusqlite::{Connection, params};
use thiserror::Error;
use uuid::Uuid;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// A stored row could not be turned into a status event.
    #[error("invalid status event {id}")]
    InvalidRecord {
        id: String,
        #[source]
        source: EventError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// A status change as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEventRecord {
    pub id: String,
    pub equipment: String,
    pub date: String,
    pub time: String,
    pub status: String,
    pub note: Option<String>,
    pub operator: String,
    pub recorded_at: String,
}

impl StatusEventRecord {
    /// Builds a record for `event` with a fresh ID.
    pub fn from_event(event: &StatusEvent, equipment: &str, recorded_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            equipment: equipment.to_string(),
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.format("%H:%M").to_string(),
            status: event.status.as_str().to_string(),
            note: event.note.clone(),
            operator: event.operator.clone(),
            recorded_at: format_timestamp(recorded_at),
        }
    }

    /// Parses the row into a status event.
    pub fn to_event(&self) -> Result<StatusEvent, DbError> {
        let event = StatusEvent::parse(&self.date, &self.time, &self.status).map_err(|source| {
            DbError::InvalidRecord {
                id: self.id.clone(),
                source,
            }
        })?;
        let event = event.with_operator(self.operator.clone());
        Ok(match &self.note {
            Some(note) => event.with_note(note.clone()),
            None => event,
        })
    }
}

/// Latest record per piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentSummary {
    pub equipment: String,
    pub last_date: String,
    pub last_time: String,
    pub event_count: usize,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            -- One row per operator-reported status change
            -- date: 'YYYY-MM-DD', time: 'HH:MM' (plant local clock)
            -- recorded_at: ISO 8601 UTC time the row was written
            CREATE TABLE IF NOT EXISTS status_events (
                id TEXT PRIMARY KEY,
                equipment TEXT NOT NULL,
                date TEXT NOT NULL,
                time TEXT NOT NULL,
                status TEXT NOT NULL,
                note TEXT,
                operator TEXT NOT NULL DEFAULT '',
                recorded_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_status_events_equipment ON status_events(equipment);
            CREATE INDEX IF NOT EXISTS idx_status_events_date ON status_events(date);
            ",
        )?;
        Ok(())
    }

    /// Inserts a batch of records, ignoring duplicates by ID.
    pub fn insert_events(&mut self, records: &[StatusEventRecord]) -> Result<usize, DbError> {
        if records.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR IGNORE INTO status_events
                (id, equipment, date, time, status, note, operator, recorded_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )?;
            for record in records {
                inserted += stmt.execute(params![
                    record.id,
                    record.equipment,
                    record.date,
                    record.time,
                    record.status,
                    record.note,
                    record.operator,
                    record.recorded_at,
                ])?;
            }
        }
        tx.commit()?;
        tracing::debug!(inserted, total = records.len(), "inserted status events");
        Ok(inserted)
    }

    /// Lists records in insertion order, optionally for one piece of equipment.
    pub fn list_records(&self, equipment: Option<&str>) -> Result<Vec<StatusEventRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, equipment, date, time, status, note, operator, recorded_at
            FROM status_events
            WHERE ?1 IS NULL OR equipment = ?1
            ORDER BY rowid ASC
            ",
        )?;
        let rows = stmt.query_map(params![equipment], |row| {
            Ok(StatusEventRecord {
                id: row.get(0)?,
                equipment: row.get(1)?,
                date: row.get(2)?,
                time: row.get(3)?,
                status: row.get(4)?,
                note: row.get(5)?,
                operator: row.get(6)?,
                recorded_at: row.get(7)?,
            })
        })?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Loads the event snapshot for the interval engine.
    ///
    /// Malformed rows are logged and skipped.
    pub fn status_events(&self, equipment: Option<&str>) -> Result<Vec<StatusEvent>, DbError> {
        let records = self.list_records(equipment)?;
        let mut events = Vec::with_capacity(records.len());
        for record in &records {
            match record.to_event() {
                Ok(event) => events.push(event),
                Err(err) => {
                    tracing::warn!(id = %record.id, error = %err, "skipping malformed status event");
                }
            }
        }
        Ok(events)
    }

    /// Lists equipment with its latest record, ordered by equipment ID.
    pub fn list_equipment(&self) -> Result<Vec<EquipmentSummary>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT equipment, MAX(date || ' ' || time) AS last_event, COUNT(*) AS event_count
            FROM status_events
            GROUP BY equipment
            ORDER BY equipment ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            let equipment: String = row.get(0)?;
            let last_event: String = row.get(1)?;
            let event_count: i64 = row.get(2)?;
            Ok((equipment, last_event, event_count))
        })?;
        let mut summaries = Vec::new();
        for row in rows {
            let (equipment, last_event, event_count) = row?;
            let (last_date, last_time) = last_event
                .split_once(' ')
                .unwrap_or((last_event.as_str(), ""));
            summaries.push(EquipmentSummary {
                equipment,
                last_date: last_date.to_string(),
                last_time: last_time.to_string(),
                event_count: usize::try_from(event_count).unwrap_or_default(),
            });
        }
        Ok(summaries)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}
