pub mod config;
pub mod db;
pub mod http;
pub mod summarizer;
pub mod workflow;

pub use config::Config;
pub use db::{CommLogEntry, Database, EventType, Transcript};
pub use http::{create_router, AppState};
pub use summarizer::{build_prompt, GeminiSummarizer, Summarizer};
