//! Audit log repository. Entries are append-only: there is no update or
//! delete here; rows disappear only via the cascade from `transcripts`.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

use super::models::{CommLogEntry, EventType};
use super::Database;

impl Database {
    /// Append an audit entry. `transcript_id` may be `None` for events that
    /// cannot be tied to a stored transcript.
    pub fn record_event(
        &self,
        transcript_id: Option<i64>,
        event_type: EventType,
        details: Option<&str>,
    ) -> Result<CommLogEntry> {
        self.with_connection(|conn| record_event_impl(conn, transcript_id, event_type, details))
    }

    /// List audit entries, newest first.
    pub fn list_events(&self, skip: u32, limit: u32) -> Result<Vec<CommLogEntry>> {
        self.with_connection(|conn| list_events_impl(conn, None, skip, limit))
    }

    /// List audit entries for one transcript, newest first.
    pub fn list_events_for_transcript(
        &self,
        transcript_id: i64,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<CommLogEntry>> {
        self.with_connection(|conn| list_events_impl(conn, Some(transcript_id), skip, limit))
    }
}

fn row_to_entry(row: &Row) -> rusqlite::Result<CommLogEntry> {
    let event_type: String = row.get(1)?;
    let event_type = event_type.parse::<EventType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, e.into())
    })?;

    Ok(CommLogEntry {
        id: row.get(0)?,
        event_type,
        details: row.get(2)?,
        transcript_id: row.get(3)?,
        timestamp: row.get(4)?,
    })
}

fn record_event_impl(
    conn: &Connection,
    transcript_id: Option<i64>,
    event_type: EventType,
    details: Option<&str>,
) -> Result<CommLogEntry> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO comm_log (event_type, details, transcript_id, timestamp)
         VALUES (?1, ?2, ?3, ?4)",
        params![event_type.as_str(), details, transcript_id, now],
    )
    .with_context(|| format!("Failed to record {} audit entry", event_type))?;

    Ok(CommLogEntry {
        id: conn.last_insert_rowid(),
        event_type,
        details: details.map(str::to_string),
        transcript_id,
        timestamp: now,
    })
}

fn list_events_impl(
    conn: &Connection,
    transcript_id: Option<i64>,
    skip: u32,
    limit: u32,
) -> Result<Vec<CommLogEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, event_type, details, transcript_id, timestamp FROM comm_log
             WHERE (?1 IS NULL OR transcript_id = ?1)
             ORDER BY timestamp DESC, id DESC
             LIMIT ?2 OFFSET ?3",
        )
        .context("Failed to prepare audit log listing")?;

    let entries = stmt
        .query_map(params![transcript_id, limit, skip], row_to_entry)
        .context("Failed to list audit entries")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read audit rows")?;

    Ok(entries)
}
