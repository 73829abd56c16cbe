//! Behavioral Health Concerns Agent
//!
//! Screens the caller's utterance for behavioral-health concern areas
//! and acknowledges with a targeted follow-up.

use async_trait::async_trait;
use serde_json::json;

use outreach_core::AgentContext;

use crate::{Agent, AgentError, AgentReply};

/// Concern areas recognized by the screener
const CONCERN_AREAS: &[(&str, &[&str])] = &[
    ("mood", &["sad", "down", "depress", "hopeless", "mood"]),
    ("anxiety", &["anxious", "anxiety", "worry", "worried", "panic"]),
    ("sleep", &["sleep", "insomnia", "tired", "awake"]),
    ("substance_use", &["drink", "alcohol", "substance", "smoking"]),
    ("stress", &["stress", "overwhelm", "pressure"]),
];

/// Behavioral-health concerns screener
pub struct ConcernsAgent;

impl ConcernsAgent {
    pub fn new() -> Self {
        Self
    }

    fn classify(utterance: &str) -> Option<&'static str> {
        let lowered = utterance.to_lowercase();
        CONCERN_AREAS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(area, _)| *area)
    }
}

impl Default for ConcernsAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for ConcernsAgent {
    fn name(&self) -> &str {
        "concerns"
    }

    fn description(&self) -> &str {
        "Handles patient behavioral health concerns"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentReply, AgentError> {
        let reply = match ctx.user_response() {
            Some(utterance) => match Self::classify(utterance) {
                Some(area) => {
                    tracing::info!(area, "Concern area identified");
                    AgentReply::with_data(
                        "Thank you for sharing that. A care coordinator can follow up with you.",
                        json!({
                            "concern_area": area,
                            "follow_up": "care_coordinator_callback",
                        }),
                    )
                }
                None => AgentReply::with_data(
                    "I hear you. Could you tell me a little more about what has been bothering you?",
                    json!({
                        "concern_area": "unclassified",
                        "follow_up": "clarify",
                    }),
                ),
            },
            None => AgentReply::with_data(
                "Over the past few weeks, have you been feeling down, anxious, or had trouble sleeping?",
                json!({ "follow_up": "screening_question" }),
            ),
        };

        Ok(reply)
    }
}
