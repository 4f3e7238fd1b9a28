//! Background summarization workflow.
//!
//! Given a transcript id, fetch the transcript, call the external summarizer,
//! write the summary back, and record an audit entry for every terminal
//! outcome. One attempt per invocation, no retry. Re-invoking for the same
//! id is safe and overwrites any previous summary on success; concurrent
//! runs for one transcript are last-write-wins.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::db::{Database, EventType, Transcript};
use crate::summarizer::{build_prompt, Summarizer};

/// Best-effort audit write. A failed audit write is reported to the log
/// stream and never aborts the operation that triggered it.
pub fn record_event(
    db: &Database,
    transcript_id: Option<i64>,
    event_type: EventType,
    details: Option<&str>,
) {
    match db.record_event(transcript_id, event_type, details) {
        Ok(_) => info!(
            "CommLog: {} event logged for transcript {:?}",
            event_type, transcript_id
        ),
        Err(e) => error!(
            "Failed to record {} audit entry for transcript {:?}: {:#}",
            event_type, transcript_id, e
        ),
    }
}

/// Schedule a workflow run as a fire-and-forget background task. The caller
/// holds no reference to its completion; unhandled failures are logged here.
pub fn spawn(db: Arc<Database>, summarizer: Option<Arc<dyn Summarizer>>, transcript_id: i64) {
    tokio::spawn(async move {
        if let Err(e) = run(&db, summarizer.as_deref(), transcript_id).await {
            error!(
                "Summarization workflow for transcript {} aborted: {:#}",
                transcript_id, e
            );
        }
    });
}

/// Attempt to produce a summary for the transcript, recording every outcome.
///
/// Returns the updated transcript on success, or `None` when the attempt was
/// skipped or failed; the reason is in the audit trail either way. The
/// transcript write and its audit entry are separate commits: they can
/// diverge under partial failure, and the audit trail is the authority on
/// what was attempted, not on what is stored.
pub async fn run(
    db: &Database,
    summarizer: Option<&dyn Summarizer>,
    transcript_id: i64,
) -> Result<Option<Transcript>> {
    let Some(summarizer) = summarizer else {
        warn!(
            "Summarizer not initialized, skipping summarization for transcript {}",
            transcript_id
        );
        record_event(
            db,
            Some(transcript_id),
            EventType::SummarySkipped,
            Some("summarizer unavailable"),
        );
        return Ok(None);
    };

    let Some(transcript) = db.get_transcript(transcript_id)? else {
        // The entry carries no transcript reference: there is nothing to
        // reference, only the id the caller asked for.
        warn!("Transcript {} not found for summarization", transcript_id);
        record_event(
            db,
            None,
            EventType::SummarySkipped,
            Some(&format!("transcript {} not found", transcript_id)),
        );
        return Ok(None);
    };

    if transcript.original_text.trim().is_empty() {
        warn!("Transcript {} has no source text to summarize", transcript_id);
        record_event(
            db,
            Some(transcript_id),
            EventType::SummarySkipped,
            Some("missing source text"),
        );
        return Ok(Some(transcript));
    }

    record_event(
        db,
        Some(transcript_id),
        EventType::SummaryGenerationStarted,
        Some(&format!("Prompt sent to model: {}", summarizer.model_name())),
    );

    let prompt = build_prompt(&transcript.original_text);

    let outcome: Result<Transcript> = async {
        let summary = summarizer
            .summarize(&prompt)
            .await
            .context("Summarizer call failed")?;

        db.update_summary(transcript_id, &summary)
            .context("Failed to persist summary")?
            .context("Transcript disappeared during summarization")
    }
    .await;

    match outcome {
        Ok(updated) => {
            info!("Summary stored for transcript {}", transcript_id);
            record_event(
                db,
                Some(transcript_id),
                EventType::SummaryGenerationSuccess,
                Some("Summary received from model."),
            );
            Ok(Some(updated))
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            error!(
                "Summarization failed for transcript {}: {}",
                transcript_id, reason
            );
            record_event(
                db,
                Some(transcript_id),
                EventType::SummaryGenerationFailed,
                Some(&reason),
            );
            Ok(None)
        }
    }
}
