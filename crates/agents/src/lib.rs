//! Conversational agent collaborators
//!
//! Each agent is an opaque unit of conversational logic behind the
//! `Agent` trait: it reads the per-call context (the caller's most
//! recent utterance, when present) and returns a structured reply or a
//! failure. The dispatcher treats replies as opaque values; their shape
//! is owned here.

pub mod benefits;
pub mod concerns;
pub mod pcp_appointment;
pub mod routing;
pub mod sdoh;

pub use benefits::BenefitsAgent;
pub use concerns::ConcernsAgent;
pub use pcp_appointment::PcpAppointmentAgent;
pub use routing::RoutingAgent;
pub use sdoh::SdohAgent;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use outreach_core::AgentContext;

/// Agent execution errors
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    #[error("Agent unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Unified error handling at the tool boundary
impl From<AgentError> for outreach_core::ToolError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::InvalidInput(msg) => outreach_core::ToolError::invalid_params(msg),
            _ => outreach_core::ToolError::internal(err.to_string()),
        }
    }
}

/// Structured reply from an agent invocation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentReply {
    /// One-line summary suitable for speaking back to the caller
    pub message: String,
    /// Structured detail; shape is owned by the producing agent
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl AgentReply {
    /// Reply with a message only
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: Value::Null,
        }
    }

    /// Reply with a message and structured detail
    pub fn with_data(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }

    /// Serialize into the opaque value handed to the dispatcher
    pub fn into_value(self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// An opaque conversational capability invoked by the dispatcher
#[async_trait]
pub trait Agent: Send + Sync {
    /// Stable agent name
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Run one turn against the per-call context
    async fn run(&self, ctx: &AgentContext) -> Result<AgentReply, AgentError>;
}
