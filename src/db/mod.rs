//! SQLite persistence for transcripts and their audit trail.
//!
//! The `Database` manager owns the connection; repository methods live in
//! `transcripts` and `commlog`.

mod commlog;
mod manager;
mod migrations;
mod models;
mod transcripts;

pub use manager::Database;
pub use models::{CommLogEntry, EventType, Transcript};
