//! Client for the external commentary service.
//!
//! The projection numbers are forwarded to an OpenAI-style chat-completions
//! endpoint and the reply is passed through verbatim as `aiAnalysis`. Any
//! failure (missing config, network, non-2xx, bad payload) degrades to a
//! fixed fallback string; the numeric result still goes out, so commentary
//! trouble never fails a request.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::projection::ProjectionSummary;

/// Returned whenever the commentary service cannot produce text.
pub const ANALYSIS_FALLBACK: &str = "Analysis unavailable.";

#[derive(Debug, Clone)]
pub struct CommentaryConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl CommentaryConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("COMMENTARY_API_KEY").unwrap_or_default(),
            base_url: std::env::var("COMMENTARY_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: std::env::var("COMMENTARY_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout_secs: 30,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

pub struct CommentaryClient {
    config: CommentaryConfig,
    http: Client,
}

impl CommentaryClient {
    pub fn new(config: CommentaryConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { config, http }
    }

    pub fn from_env() -> Self {
        Self::new(CommentaryConfig::from_env())
    }

    /// Produces commentary text for a finished projection, or the fallback.
    pub async fn analyze(
        &self,
        target_team: &str,
        team_count: usize,
        trials: usize,
        summary: &ProjectionSummary,
    ) -> String {
        if !self.config.is_configured() {
            return ANALYSIS_FALLBACK.to_string();
        }
        match self.request_analysis(target_team, team_count, trials, summary).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "commentary service failed, using fallback");
                ANALYSIS_FALLBACK.to_string()
            }
        }
    }

    async fn request_analysis(
        &self,
        target_team: &str,
        team_count: usize,
        trials: usize,
        summary: &ProjectionSummary,
    ) -> anyhow::Result<String> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(target_team, team_count, trials, summary),
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("empty commentary response"))
    }
}

fn build_prompt(
    target_team: &str,
    team_count: usize,
    trials: usize,
    summary: &ProjectionSummary,
) -> String {
    format!(
        "Team: {target_team}\n\
         Teams in league: {team_count}\n\
         Simulation ({trials} trials):\n\
         - Best finish: {}\n\
         - Worst finish: {}\n\
         - Championship: {:.1}%\n\
         - Playoffs: {:.1}%\n\
         - Relegation: {:.1}%\n\n\
         Write a short, witty volleyball commentary for this team.",
        summary.best_rank,
        summary.worst_rank,
        summary.championship_probability.unwrap_or(0.0),
        summary.playoff_probability.unwrap_or(0.0),
        summary.relegation_probability.unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_falls_back_without_network() {
        let client = CommentaryClient::new(CommentaryConfig {
            api_key: String::new(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "test".to_string(),
            timeout_secs: 1,
        });
        let summary = crate::projection::summarize(&[1, 2], 4, 2);
        let text = client.analyze("Testers", 4, 2, &summary).await;
        assert_eq!(text, ANALYSIS_FALLBACK);
    }

    #[tokio::test]
    async fn unreachable_service_falls_back() {
        // Port 9 (discard) refuses immediately; the request errors fast.
        let client = CommentaryClient::new(CommentaryConfig {
            api_key: "key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "test".to_string(),
            timeout_secs: 1,
        });
        let summary = crate::projection::summarize(&[1, 2], 4, 2);
        let text = client.analyze("Testers", 4, 2, &summary).await;
        assert_eq!(text, ANALYSIS_FALLBACK);
    }

    #[test]
    fn prompt_contains_the_numbers() {
        let summary = crate::projection::summarize(&[1, 1, 3], 10, 4);
        let prompt = build_prompt("Spikers", 10, 4, &summary);
        assert!(prompt.contains("Spikers"));
        assert!(prompt.contains("Championship: 50.0%"));
        assert!(prompt.contains("4 trials"));
    }
}
