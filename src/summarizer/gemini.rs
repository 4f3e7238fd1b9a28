//! Google Generative Language API client (generateContent endpoint).

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Summarizer;
use crate::config::SummarizerConfig;

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Summarizer backed by the Gemini REST API.
pub struct GeminiSummarizer {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiSummarizer {
    /// Build the client from configuration. Fails when no credential is
    /// configured; the caller then runs the service in degraded mode.
    pub fn new(cfg: &SummarizerConfig) -> Result<Self> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .context("Summarizer API key is not configured")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Summarization request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Summarizer returned HTTP {}: {}", status, body);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to decode summarizer response")?;

        let summary = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .context("Summarizer response contained no candidates")?;

        Ok(summary)
    }
}
