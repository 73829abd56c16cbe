//! PCP Appointment Agent
//!
//! Offers and confirms primary-care appointment slots.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::json;

use outreach_core::AgentContext;

use crate::{Agent, AgentError, AgentReply};

/// Slots offered when confirming an appointment
const TIME_SLOTS: &[&str] = &["10:00 AM", "11:30 AM", "2:00 PM", "3:30 PM"];

/// Days ahead for the proposed visit
const LEAD_DAYS: i64 = 7;

/// Primary-care appointment scheduler
pub struct PcpAppointmentAgent;

impl PcpAppointmentAgent {
    pub fn new() -> Self {
        Self
    }

    fn is_affirmative(utterance: &str) -> bool {
        let lowered = utterance.to_lowercase();
        ["yes", "sure", "okay", "ok", "please", "sounds good"]
            .iter()
            .any(|k| lowered.contains(k))
    }

    fn proposed_date() -> String {
        (Utc::now().date_naive() + Duration::days(LEAD_DAYS))
            .format("%Y-%m-%d")
            .to_string()
    }

    fn confirmation_id() -> String {
        format!(
            "APT{}",
            uuid::Uuid::new_v4().to_string()[..8].to_uppercase()
        )
    }
}

impl Default for PcpAppointmentAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for PcpAppointmentAgent {
    fn name(&self) -> &str {
        "pcp_appointment"
    }

    fn description(&self) -> &str {
        "Handles PCP appointment scheduling"
    }

    async fn run(&self, ctx: &AgentContext) -> Result<AgentReply, AgentError> {
        let reply = match ctx.user_response() {
            Some(utterance) if Self::is_affirmative(utterance) => {
                let appointment_id = Self::confirmation_id();
                let date = Self::proposed_date();
                let time_slot = TIME_SLOTS[0];
                tracing::info!(appointment_id = %appointment_id, date = %date, "Appointment scheduled");
                AgentReply::with_data(
                    format!(
                        "You are booked with your PCP on {} at {}. Our team will call to confirm.",
                        date, time_slot
                    ),
                    json!({
                        "appointment_id": appointment_id,
                        "date": date,
                        "time_slot": time_slot,
                        "status": "pending_confirmation",
                    }),
                )
            }
            Some(_) => AgentReply::with_data(
                "No problem. Would another week work better for your PCP visit?",
                json!({ "status": "declined", "next_action": "offer_alternative" }),
            ),
            None => AgentReply::with_data(
                format!(
                    "Your PCP has availability on {}. Available times are {}. Shall I book one?",
                    Self::proposed_date(),
                    TIME_SLOTS.join(", ")
                ),
                json!({ "status": "offered", "time_slots": TIME_SLOTS }),
            ),
        };

        Ok(reply)
    }
}
