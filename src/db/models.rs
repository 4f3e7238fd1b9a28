use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored call transcript with its optional generated summary.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub id: i64,
    pub original_text: String,
    /// Absent until the summarization workflow succeeds; overwritten on
    /// resummarization.
    pub summary_text: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation, including the summary write.
    pub updated_at: DateTime<Utc>,
}

/// An immutable audit record of a lifecycle event, optionally tied to a
/// transcript. Entries are never mutated; they are deleted only by cascade
/// when their owning transcript is deleted.
#[derive(Debug, Clone, Serialize)]
pub struct CommLogEntry {
    pub id: i64,
    pub event_type: EventType,
    pub details: Option<String>,
    /// Nullable by design: an entry may precede or outlive its association
    /// with a transcript.
    pub transcript_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

/// The fixed vocabulary of audit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    TranscriptCreated,
    ResummaryRequested,
    SummarySkipped,
    SummaryGenerationStarted,
    SummaryGenerationSuccess,
    SummaryGenerationFailed,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::TranscriptCreated => "TRANSCRIPT_CREATED",
            EventType::ResummaryRequested => "RESUMMARY_REQUESTED",
            EventType::SummarySkipped => "SUMMARY_SKIPPED",
            EventType::SummaryGenerationStarted => "SUMMARY_GENERATION_STARTED",
            EventType::SummaryGenerationSuccess => "SUMMARY_GENERATION_SUCCESS",
            EventType::SummaryGenerationFailed => "SUMMARY_GENERATION_FAILED",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRANSCRIPT_CREATED" => Ok(EventType::TranscriptCreated),
            "RESUMMARY_REQUESTED" => Ok(EventType::ResummaryRequested),
            "SUMMARY_SKIPPED" => Ok(EventType::SummarySkipped),
            "SUMMARY_GENERATION_STARTED" => Ok(EventType::SummaryGenerationStarted),
            "SUMMARY_GENERATION_SUCCESS" => Ok(EventType::SummaryGenerationSuccess),
            "SUMMARY_GENERATION_FAILED" => Ok(EventType::SummaryGenerationFailed),
            other => Err(anyhow::anyhow!("Unknown event type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip() {
        let all = [
            EventType::TranscriptCreated,
            EventType::ResummaryRequested,
            EventType::SummarySkipped,
            EventType::SummaryGenerationStarted,
            EventType::SummaryGenerationSuccess,
            EventType::SummaryGenerationFailed,
        ];

        for event in all {
            assert_eq!(event.as_str().parse::<EventType>().unwrap(), event);
        }
    }

    #[test]
    fn test_event_type_serializes_as_wire_name() {
        let json = serde_json::to_string(&EventType::SummaryGenerationFailed).unwrap();
        assert_eq!(json, "\"SUMMARY_GENERATION_FAILED\"");
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        assert!("SUMMARY_EXPLODED".parse::<EventType>().is_err());
    }
}
