//! HTTP API for the call summary service
//!
//! This module provides the REST surface:
//! - POST /api/v1/transcripts - Store a transcript and schedule summarization
//! - GET /api/v1/transcripts - List transcripts (newest first)
//! - GET /api/v1/transcripts/:id - Fetch one transcript
//! - POST /api/v1/transcripts/:id/resummarize - Re-run summarization
//! - GET /api/v1/commlogs - List audit entries (newest first)
//! - GET /api/v1/commlogs/transcript/:id - Audit entries for one transcript
//! - POST /api/v1/utils/clear-all-data - Wipe both tables, reset sequences
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
