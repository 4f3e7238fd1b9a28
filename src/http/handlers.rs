use super::state::AppState;
use crate::db::EventType;
use crate::workflow;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTranscriptRequest {
    pub original_text: String,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    fn skip(&self) -> u32 {
        self.skip.unwrap_or(0)
    }

    fn limit(&self) -> u32 {
        self.limit.unwrap_or(100)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/transcripts
/// Store a new transcript and schedule background summarization
pub async fn create_transcript(
    State(state): State<AppState>,
    Json(req): Json<CreateTranscriptRequest>,
) -> impl IntoResponse {
    let transcript = match state.db.create_transcript(&req.original_text) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to store transcript: {:#}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to store transcript: {}", e),
                }),
            )
                .into_response();
        }
    };

    info!("Stored transcript {}", transcript.id);

    // Recorded before responding; failures are logged, never fatal.
    workflow::record_event(
        &state.db,
        Some(transcript.id),
        EventType::TranscriptCreated,
        Some("Transcript received and stored."),
    );

    // Fire and forget: the response does not wait for the summary.
    workflow::spawn(state.db.clone(), state.summarizer.clone(), transcript.id);

    (StatusCode::CREATED, Json(transcript)).into_response()
}

/// GET /api/v1/transcripts?skip=&limit=
/// List transcripts, newest created_at first
pub async fn list_transcripts(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> impl IntoResponse {
    match state.db.list_transcripts(page.skip(), page.limit()) {
        Ok(transcripts) => (StatusCode::OK, Json(transcripts)).into_response(),
        Err(e) => {
            error!("Failed to list transcripts: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list transcripts: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/transcripts/:id
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.db.get_transcript(id) {
        Ok(Some(transcript)) => (StatusCode::OK, Json(transcript)).into_response(),
        Ok(None) => transcript_not_found(id),
        Err(e) => {
            error!("Failed to fetch transcript {}: {:#}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch transcript: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/transcripts/:id/resummarize
/// Return the (possibly stale) transcript immediately and schedule a fresh
/// summarization run
pub async fn resummarize_transcript(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let transcript = match state.db.get_transcript(id) {
        Ok(Some(t)) => t,
        Ok(None) => return transcript_not_found(id),
        Err(e) => {
            error!("Failed to fetch transcript {}: {:#}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch transcript: {}", e),
                }),
            )
                .into_response();
        }
    };

    info!("Resummarization requested for transcript {}", id);

    workflow::record_event(
        &state.db,
        Some(id),
        EventType::ResummaryRequested,
        Some("Resummarization requested by client."),
    );

    workflow::spawn(state.db.clone(), state.summarizer.clone(), id);

    (StatusCode::OK, Json(transcript)).into_response()
}

/// GET /api/v1/commlogs?skip=&limit=
/// List audit entries, newest timestamp first
pub async fn list_commlogs(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> impl IntoResponse {
    match state.db.list_events(page.skip(), page.limit()) {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!("Failed to list audit entries: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list audit entries: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/v1/commlogs/transcript/:id?skip=&limit=
/// Audit entries for one transcript, newest timestamp first
pub async fn list_commlogs_for_transcript(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(page): Query<Pagination>,
) -> impl IntoResponse {
    // 404 for unknown transcripts rather than an empty list
    match state.db.get_transcript(id) {
        Ok(Some(_)) => {}
        Ok(None) => return transcript_not_found(id),
        Err(e) => {
            error!("Failed to fetch transcript {}: {:#}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch transcript: {}", e),
                }),
            )
                .into_response();
        }
    }

    match state
        .db
        .list_events_for_transcript(id, page.skip(), page.limit())
    {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!("Failed to list audit entries for transcript {}: {:#}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to list audit entries: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// POST /api/v1/utils/clear-all-data
/// Destructively wipe both tables and reset identifier sequences to 1
pub async fn clear_all_data(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.clear_all_data() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to clear data: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("An error occurred while clearing data: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to the Call Summary API!"
    }))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn transcript_not_found(id: i64) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Transcript with id {} not found", id),
        }),
    )
        .into_response()
}
