//! Initial Call Routing Agent
//!
//! Routes a new call to the capability that should handle it, based on
//! the caller's stated intent.

use async_trait::async_trait;
use serde_json::json;

use outreach_core::AgentContext;

use crate::{Agent, AgentError, AgentReply};

/// Routing table: (destination, keywords)
const ROUTES: &[(&str, &[&str])] = &[
    ("pcp_appointment", &["appointment", "schedule", "doctor", "pcp"]),
    ("benefits", &["benefit", "coverage", "covered", "ride", "meal"]),
    ("concerns", &["feel", "sleep", "anxious", "sad", "stress"]),
    ("sdoh", &["housing", "food", "utilities", "rent", "transport"]),
    ("validation", &["verify", "identity", "member id"]),
];

/// Intent-based call router
pub struct RoutingAgent;

impl RoutingAgent {
    pub fn new() -> Self {
        Self
    }

    fn route(utterance: &str) -> Option<&'static str> {
        let lowered = utterance.to_lowercase();
        ROUTES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(destination, _)| *destination)
    }
}

impl Default for RoutingAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for RoutingAgent {
    fn name(&self) -> &str {
        "routing"
    }

    fn description(&self) -> &str {
        "Handles initial call routing"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentReply, AgentError> {
        let reply = match ctx.user_response() {
            Some(utterance) => match Self::route(utterance) {
                Some(destination) => {
                    tracing::info!(destination, "Call routed");
                    AgentReply::with_data(
                        "I can help with that - connecting you now.",
                        json!({ "route": destination }),
                    )
                }
                None => AgentReply::with_data(
                    "I did not quite catch that. Are you calling about an appointment, benefits, or how you have been feeling?",
                    json!({ "route": "undetermined" }),
                ),
            },
            None => AgentReply::with_data(
                "Hello! This is your health plan calling. What can we help you with today?",
                json!({ "route": "greeting" }),
            ),
        };

        Ok(reply)
    }
}
