use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizerConfig {
    /// API credential for the external provider. Absent or empty means the
    /// service runs without summarization.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            // e.g. CALL_SUMMARY_SUMMARIZER__API_KEY overrides summarizer.api_key
            .add_source(config::Environment::with_prefix("CALL_SUMMARY").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
