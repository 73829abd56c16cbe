//! Social Determinants of Health Agent
//!
//! Screens for social needs and flags domains that warrant a referral.

use async_trait::async_trait;
use serde_json::json;

use outreach_core::AgentContext;

use crate::{Agent, AgentError, AgentReply};

/// Screening domains: (domain, keywords)
const DOMAINS: &[(&str, &[&str])] = &[
    ("housing", &["housing", "rent", "evict", "homeless"]),
    ("food", &["food", "meal", "hungry", "groceries"]),
    ("transportation", &["ride", "transport", "bus", "car"]),
    ("utilities", &["utilities", "electric", "heat", "water bill"]),
    ("safety", &["safe", "afraid", "threat"]),
];

/// Social-needs screener
pub struct SdohAgent;

impl SdohAgent {
    pub fn new() -> Self {
        Self
    }

    fn screen(utterance: &str) -> Option<&'static str> {
        let lowered = utterance.to_lowercase();
        DOMAINS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(domain, _)| *domain)
    }
}

impl Default for SdohAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for SdohAgent {
    fn name(&self) -> &str {
        "sdoh"
    }

    fn description(&self) -> &str {
        "Handles Social Determinants of Health assessment"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentReply, AgentError> {
        let reply = match ctx.user_response() {
            Some(utterance) => match Self::screen(utterance) {
                Some(domain) => {
                    tracing::info!(domain, "Social need flagged");
                    AgentReply::with_data(
                        "Thank you for telling me. I will connect you with a community resource specialist.",
                        json!({ "domain": domain, "flagged": true, "referral": "community_resources" }),
                    )
                }
                None => AgentReply::with_data(
                    "Understood. Is there anything else making it hard to stay healthy at home?",
                    json!({ "flagged": false }),
                ),
            },
            None => AgentReply::with_data(
                "In the past month, have you had trouble with housing, food, transportation, or utility bills?",
                json!({ "flagged": false, "next_action": "screening_question" }),
            ),
        };

        Ok(reply)
    }
}
