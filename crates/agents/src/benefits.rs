//! Benefits Agent
//!
//! Answers questions about no-cost plan benefits.

use async_trait::async_trait;
use serde_json::json;

use outreach_core::AgentContext;

use crate::{Agent, AgentError, AgentReply};

/// Benefit catalog: (id, keywords, description)
const BENEFITS: &[(&str, &[&str], &str)] = &[
    (
        "transportation",
        &["ride", "transport", "car", "bus"],
        "Free rides to and from medical appointments",
    ),
    (
        "meals",
        &["meal", "food", "nutrition"],
        "Home-delivered meals after a hospital stay",
    ),
    (
        "fitness",
        &["gym", "fitness", "exercise"],
        "No-cost fitness center membership",
    ),
    (
        "otc_allowance",
        &["otc", "over-the-counter", "pharmacy", "allowance"],
        "Quarterly allowance for over-the-counter items",
    ),
];

/// No-cost benefits lookup
pub struct BenefitsAgent;

impl BenefitsAgent {
    pub fn new() -> Self {
        Self
    }

    fn lookup(utterance: &str) -> Option<(&'static str, &'static str)> {
        let lowered = utterance.to_lowercase();
        BENEFITS
            .iter()
            .find(|(_, keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(id, _, description)| (*id, *description))
    }

    fn catalog() -> Vec<serde_json::Value> {
        BENEFITS
            .iter()
            .map(|(id, _, description)| json!({"benefit": id, "description": description}))
            .collect()
    }
}

impl Default for BenefitsAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for BenefitsAgent {
    fn name(&self) -> &str {
        "benefits"
    }

    fn description(&self) -> &str {
        "Handles benefits related queries"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentReply, AgentError> {
        let reply = match ctx.user_response().and_then(Self::lookup) {
            Some((benefit, description)) => AgentReply::with_data(
                format!("Good news - that is covered: {}.", description),
                json!({ "benefit": benefit, "description": description }),
            ),
            None => AgentReply::with_data(
                "Your plan includes several no-cost benefits. Which one would you like to hear about?",
                json!({ "available_benefits": Self::catalog() }),
            ),
        };

        Ok(reply)
    }
}
