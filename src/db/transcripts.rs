//! Transcript repository.

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::Transcript;
use super::Database;

impl Database {
    /// Store a new transcript. `original_text` is immutable after this point.
    pub fn create_transcript(&self, original_text: &str) -> Result<Transcript> {
        self.with_connection(|conn| create_transcript_impl(conn, original_text))
    }

    pub fn get_transcript(&self, id: i64) -> Result<Option<Transcript>> {
        self.with_connection(|conn| get_transcript_impl(conn, id))
    }

    /// List transcripts, newest `created_at` first.
    pub fn list_transcripts(&self, skip: u32, limit: u32) -> Result<Vec<Transcript>> {
        self.with_connection(|conn| list_transcripts_impl(conn, skip, limit))
    }

    /// Write the generated summary and refresh `updated_at`. Returns the
    /// updated transcript, or `None` if it no longer exists.
    pub fn update_summary(&self, id: i64, summary_text: &str) -> Result<Option<Transcript>> {
        self.with_connection(|conn| update_summary_impl(conn, id, summary_text))
    }
}

const TRANSCRIPT_COLUMNS: &str = "id, original_text, summary_text, created_at, updated_at";

fn row_to_transcript(row: &Row) -> rusqlite::Result<Transcript> {
    Ok(Transcript {
        id: row.get(0)?,
        original_text: row.get(1)?,
        summary_text: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

fn create_transcript_impl(conn: &Connection, original_text: &str) -> Result<Transcript> {
    let now = Utc::now();

    conn.execute(
        "INSERT INTO transcripts (original_text, summary_text, created_at, updated_at)
         VALUES (?1, NULL, ?2, ?2)",
        params![original_text, now],
    )
    .context("Failed to insert transcript")?;

    Ok(Transcript {
        id: conn.last_insert_rowid(),
        original_text: original_text.to_string(),
        summary_text: None,
        created_at: now,
        updated_at: now,
    })
}

fn get_transcript_impl(conn: &Connection, id: i64) -> Result<Option<Transcript>> {
    let transcript = conn
        .query_row(
            &format!("SELECT {TRANSCRIPT_COLUMNS} FROM transcripts WHERE id = ?1"),
            params![id],
            row_to_transcript,
        )
        .optional()
        .context("Failed to query transcript")?;

    Ok(transcript)
}

fn list_transcripts_impl(conn: &Connection, skip: u32, limit: u32) -> Result<Vec<Transcript>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {TRANSCRIPT_COLUMNS} FROM transcripts
             ORDER BY created_at DESC, id DESC
             LIMIT ?1 OFFSET ?2"
        ))
        .context("Failed to prepare transcript listing")?;

    let transcripts = stmt
        .query_map(params![limit, skip], row_to_transcript)
        .context("Failed to list transcripts")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read transcript rows")?;

    Ok(transcripts)
}

fn update_summary_impl(
    conn: &Connection,
    id: i64,
    summary_text: &str,
) -> Result<Option<Transcript>> {
    let now = Utc::now();

    let updated = conn
        .execute(
            "UPDATE transcripts SET summary_text = ?1, updated_at = ?2 WHERE id = ?3",
            params![summary_text, now, id],
        )
        .context("Failed to update transcript summary")?;

    if updated == 0 {
        return Ok(None);
    }

    get_transcript_impl(conn, id)
}
