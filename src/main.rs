use anyhow::Result;
use call_summary::summarizer::{GeminiSummarizer, Summarizer};
use call_summary::{create_router, AppState, Config, Database};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "call-summary", about = "Call transcript summarization service")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/call-summary")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);

    let db = Arc::new(Database::open(&cfg.database.path)?);

    // A missing credential is not fatal: the service still stores
    // transcripts, and the workflow records SUMMARY_SKIPPED instead.
    let summarizer: Option<Arc<dyn Summarizer>> = match GeminiSummarizer::new(&cfg.summarizer) {
        Ok(s) => {
            info!("Summarizer initialized with model: {}", s.model_name());
            Some(Arc::new(s))
        }
        Err(e) => {
            warn!(
                "Summarizer unavailable: {:#}. Transcripts will be stored without summaries.",
                e
            );
            None
        }
    };

    let state = AppState::new(db, summarizer);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
