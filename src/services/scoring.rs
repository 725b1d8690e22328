//! Lead scoring via an external language model.
//!
//! The scorer renders the lead's engagement context into a prompt,
//! asks the model for a single integer and clamps it into [0, 100].
//! Any failure on the model side degrades to the fixed fallback score.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::config::ScoringConfig;
use crate::errors::{LuxmeetError, Result};
use crate::models::{LeadInteraction, LeadSource};

use super::transport::JsonTransport;

/// Score returned whenever the model cannot be reached or replies with
/// something unusable.
pub const FALLBACK_SCORE: u8 = 50;

pub const MIN_SCORE: u8 = 0;
pub const MAX_SCORE: u8 = 100;

/// Engagement summary handed to the model.
#[derive(Debug, Clone)]
pub struct LeadContext {
    pub source: LeadSource,
    pub interactions: Vec<LeadInteraction>,
    pub email_domain: String,
    pub total_interactions: usize,
    /// Whole minutes between the first interaction and the first
    /// click/share, when both exist.
    pub time_to_respond: Option<i64>,
}

/// Abstraction over the scoring model provider.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Returns the model's raw text reply for the given prompt.
    async fn request_score(&self, prompt: &str) -> Result<String>;

    fn name(&self) -> &'static str;
}

/// Chat-completions-shaped HTTP client.
pub struct HttpScoringClient {
    transport: Arc<dyn JsonTransport>,
    api_url: String,
    api_key: String,
    model: String,
}

impl HttpScoringClient {
    pub fn new(config: &ScoringConfig, transport: Arc<dyn JsonTransport>) -> Self {
        Self {
            transport,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    async fn request_score(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": 5,
            "temperature": 0.3,
        });

        let reply = self
            .transport
            .post_json(&self.api_url, Some(&self.api_key), body)
            .await
            .map_err(|e| LuxmeetError::scoring(e.message()))?;

        reply["choices"][0]["message"]["content"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| LuxmeetError::scoring("Model reply carried no content"))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Render the scoring prompt from an engagement context.
pub fn build_scoring_prompt(context: &LeadContext) -> String {
    let interaction_lines: Vec<String> = context
        .interactions
        .iter()
        .map(|interaction| {
            let details = interaction
                .details
                .as_deref()
                .map(|d| format!(": {}", d))
                .unwrap_or_default();
            format!(
                "- {} at {}{}",
                interaction.kind.as_ref(),
                interaction.timestamp.to_rfc3339(),
                details
            )
        })
        .collect();

    let time_to_respond = context
        .time_to_respond
        .map(|minutes| format!("{} minutes", minutes))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Analyze this lead's engagement data and provide a lead score from 0-100:\n\
         \n\
         Lead Source: {}\n\
         Email Domain: {}\n\
         Total Interactions: {}\n\
         Time to Respond: {}\n\
         \n\
         Recent Interactions:\n\
         {}\n\
         \n\
         Consider:\n\
         1. Quality of interactions (downloads > shares > clicks > views)\n\
         2. Frequency and recency of interactions\n\
         3. Response time\n\
         4. Lead source quality (direct > nfc > qr)\n\
         5. Email domain reputation (business vs personal email)\n\
         \n\
         Return only a number between 0 and 100.",
        context.source,
        context.email_domain,
        context.total_interactions,
        time_to_respond,
        interaction_lines.join("\n"),
    )
}

/// Parse a leading integer from the model's reply, the way `parseInt`
/// would: optional sign, then digits, trailing garbage ignored.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };

    let digits: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Clamp a raw model number into the valid score range.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use crate::models::InteractionKind;

    fn context() -> LeadContext {
        LeadContext {
            source: LeadSource::Direct,
            interactions: vec![LeadInteraction {
                kind: InteractionKind::Download,
                timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
                details: Some("pricing.pdf".to_string()),
            }],
            email_domain: "acme.io".to_string(),
            total_interactions: 1,
            time_to_respond: Some(12),
        }
    }

    #[test]
    fn test_prompt_contains_context() {
        let prompt = build_scoring_prompt(&context());
        assert!(prompt.contains("Lead Source: direct"));
        assert!(prompt.contains("Email Domain: acme.io"));
        assert!(prompt.contains("Total Interactions: 1"));
        assert!(prompt.contains("Time to Respond: 12 minutes"));
        assert!(prompt.contains("- download at 2026-03-01T09:30:00+00:00: pricing.pdf"));
        assert!(prompt.contains("Return only a number between 0 and 100."));
    }

    #[test]
    fn test_prompt_no_response_time() {
        let mut ctx = context();
        ctx.time_to_respond = None;
        let prompt = build_scoring_prompt(&ctx);
        assert!(prompt.contains("Time to Respond: N/A"));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("87"), Some(87));
        assert_eq!(parse_leading_int(" 87 \n"), Some(87));
        assert_eq!(parse_leading_int("87 out of 100"), Some(87));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(87), 87);
        assert_eq!(clamp_score(142), 100);
        assert_eq!(clamp_score(-3), 0);
        assert_eq!(clamp_score(0), 0);
        assert_eq!(clamp_score(100), 100);
    }
}
