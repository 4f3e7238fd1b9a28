// Integration tests for the SQLite persistence layer
//
// These tests verify transcript storage, audit log ordering, the
// foreign-key cascade, and the destructive clear-all-data operation.

use anyhow::Result;
use call_summary::{Database, EventType};
use std::thread::sleep;
use std::time::Duration;
use tempfile::TempDir;

fn test_db() -> Result<(TempDir, Database)> {
    let dir = TempDir::new()?;
    let db = Database::open(dir.path().join("test.db"))?;
    Ok((dir, db))
}

#[test]
fn test_create_transcript_assigns_sequential_ids() -> Result<()> {
    let (_dir, db) = test_db()?;

    let first = db.create_transcript("first call")?;
    let second = db.create_transcript("second call")?;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(first.original_text, "first call");
    assert!(first.summary_text.is_none(), "New transcripts have no summary");
    assert_eq!(first.created_at, first.updated_at);

    Ok(())
}

#[test]
fn test_get_transcript_round_trip() -> Result<()> {
    let (_dir, db) = test_db()?;

    let created = db.create_transcript("hello world")?;
    let fetched = db.get_transcript(created.id)?.expect("transcript exists");

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.original_text, "hello world");
    assert_eq!(fetched.created_at, created.created_at);

    assert!(db.get_transcript(999)?.is_none());

    Ok(())
}

#[test]
fn test_update_summary_refreshes_updated_at() -> Result<()> {
    let (_dir, db) = test_db()?;

    let created = db.create_transcript("call text")?;
    sleep(Duration::from_millis(10));

    let updated = db
        .update_summary(created.id, "a short summary")?
        .expect("transcript exists");

    assert_eq!(updated.summary_text.as_deref(), Some("a short summary"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    // Overwrite: last write wins
    let overwritten = db
        .update_summary(created.id, "a better summary")?
        .expect("transcript exists");
    assert_eq!(overwritten.summary_text.as_deref(), Some("a better summary"));

    // Missing transcripts update nothing
    assert!(db.update_summary(999, "summary")?.is_none());

    Ok(())
}

#[test]
fn test_list_transcripts_newest_first_with_pagination() -> Result<()> {
    let (_dir, db) = test_db()?;

    for i in 1..=5 {
        db.create_transcript(&format!("call {}", i))?;
    }

    let first_page = db.list_transcripts(0, 2)?;
    let second_page = db.list_transcripts(2, 2)?;
    let third_page = db.list_transcripts(4, 2)?;

    let ids: Vec<i64> = first_page
        .iter()
        .chain(second_page.iter())
        .chain(third_page.iter())
        .map(|t| t.id)
        .collect();

    // Strictly descending, no duplicates across adjacent pages
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);

    Ok(())
}

#[test]
fn test_record_event_with_and_without_transcript() -> Result<()> {
    let (_dir, db) = test_db()?;

    let transcript = db.create_transcript("call text")?;

    let tied = db.record_event(
        Some(transcript.id),
        EventType::TranscriptCreated,
        Some("Transcript received and stored."),
    )?;
    assert_eq!(tied.transcript_id, Some(transcript.id));
    assert_eq!(tied.event_type, EventType::TranscriptCreated);

    let untied = db.record_event(None, EventType::SummarySkipped, Some("transcript 7 not found"))?;
    assert_eq!(untied.transcript_id, None);

    Ok(())
}

#[test]
fn test_record_event_rejects_unknown_transcript() -> Result<()> {
    let (_dir, db) = test_db()?;

    let result = db.record_event(Some(999), EventType::SummarySkipped, None);
    assert!(result.is_err(), "Foreign keys should be enforced");

    Ok(())
}

#[test]
fn test_list_events_newest_first() -> Result<()> {
    let (_dir, db) = test_db()?;

    let transcript = db.create_transcript("call text")?;
    for i in 1..=4 {
        db.record_event(
            Some(transcript.id),
            EventType::ResummaryRequested,
            Some(&format!("attempt {}", i)),
        )?;
    }

    let all = db.list_events(0, 100)?;
    let ids: Vec<i64> = all.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![4, 3, 2, 1]);

    let page = db.list_events(1, 2)?;
    let page_ids: Vec<i64> = page.iter().map(|e| e.id).collect();
    assert_eq!(page_ids, vec![3, 2]);

    let filtered = db.list_events_for_transcript(transcript.id, 0, 100)?;
    assert_eq!(filtered.len(), 4);

    Ok(())
}

#[test]
fn test_deleting_transcript_cascades_to_audit_entries() -> Result<()> {
    let (_dir, db) = test_db()?;

    let transcript = db.create_transcript("call text")?;
    db.record_event(Some(transcript.id), EventType::TranscriptCreated, None)?;
    db.record_event(Some(transcript.id), EventType::SummarySkipped, None)?;
    let orphan = db.record_event(None, EventType::SummarySkipped, None)?;

    db.with_connection(|conn| {
        conn.execute("DELETE FROM transcripts WHERE id = ?1", [transcript.id])?;
        Ok(())
    })?;

    let remaining = db.list_events(0, 100)?;
    assert_eq!(remaining.len(), 1, "Only the unassociated entry survives");
    assert_eq!(remaining[0].id, orphan.id);

    Ok(())
}

#[test]
fn test_clear_all_data_resets_sequences() -> Result<()> {
    let (_dir, db) = test_db()?;

    let transcript = db.create_transcript("first")?;
    db.create_transcript("second")?;
    db.record_event(Some(transcript.id), EventType::TranscriptCreated, None)?;

    db.clear_all_data()?;

    assert!(db.list_transcripts(0, 100)?.is_empty());
    assert!(db.list_events(0, 100)?.is_empty());

    let fresh = db.create_transcript("after reset")?;
    assert_eq!(fresh.id, 1, "Identifier sequence restarts at 1");

    let entry = db.record_event(Some(fresh.id), EventType::TranscriptCreated, None)?;
    assert_eq!(entry.id, 1);

    Ok(())
}
