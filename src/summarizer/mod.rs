//! External summarizer integration.
//!
//! `Summarizer` is the seam between the workflow and the language-model
//! provider; `GeminiSummarizer` is the production implementation.

mod gemini;

pub use gemini::GeminiSummarizer;

use anyhow::Result;
use async_trait::async_trait;

/// A language-model service that turns prompt text into summary text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Model identifier, recorded in the audit trail.
    fn model_name(&self) -> &str;

    /// Produce summary text for the given prompt. May be slow; the caller
    /// treats any error as "no summary produced".
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

/// Fixed prompt template for call transcript summarization.
pub fn build_prompt(original_text: &str) -> String {
    format!(
        "Please summarize the following call transcript:\n\n---\n{}\n---\n\nSummary:",
        original_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_wraps_transcript() {
        let prompt = build_prompt("Agent: hello.");

        assert!(prompt.starts_with("Please summarize the following call transcript:"));
        assert!(prompt.contains("---\nAgent: hello.\n---"));
        assert!(prompt.ends_with("Summary:"));
    }
}
