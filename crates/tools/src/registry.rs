//! Tool Registry
//!
//! Manages tool registration, discovery, and dispatch.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use outreach_agents::{
    BenefitsAgent, ConcernsAgent, PcpAppointmentAgent, RoutingAgent, SdohAgent,
};
use outreach_core::{AgentContext, Tool, ToolError, ToolReply, ToolSchema};
use outreach_registry::PatientRegistry;

use crate::agent_tool::AgentTool;
use crate::validation::ValidationTool;

/// The gateway's fixed tool catalog
pub const TOOL_NAMES: &[&str] = &[
    "validation",
    "concerns",
    "benefits",
    "routing",
    "pcp_appointment",
    "sdoh",
];

/// One tool invocation as received from the transport
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    /// Tool payload; may carry `user_response` and, for validation,
    /// `full_name`/`dob`
    pub payload: Value,
}

/// Normalized dispatch outcome.
///
/// Exactly one of the three shapes per call: a verdict body for the
/// identity-verification tool, the generic success envelope, or the
/// failure envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum DispatchResponse {
    /// `{valid, message, patient_info?}`
    Verdict(Value),
    /// `{"result": ...}`
    Success { result: Value },
    /// `{"error": ...}`
    Failure { error: String },
}

impl DispatchResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }
}

/// Tool executor trait
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Execute a tool by name
    async fn execute(
        &self,
        name: &str,
        payload: Value,
        ctx: &AgentContext,
    ) -> Result<ToolReply, ToolError>;

    /// List available tools
    fn list_tools(&self) -> Vec<ToolSchema>;

    /// Get tool schema by name
    fn get_tool(&self, name: &str) -> Option<ToolSchema>;
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    /// Register a boxed tool
    pub fn register_boxed(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        self.tools.insert(name, tool);
    }

    /// Get tool by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get all tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Dispatch one tool invocation and normalize the outcome.
    ///
    /// The per-call context is built from the payload before the tool
    /// executes, so a `user_response` in the payload is visible to the
    /// collaborator at execution time. Every failure - unknown tool,
    /// invalid payload, collaborator error, timeout - degrades to the
    /// failure envelope with a non-empty message.
    pub async fn dispatch(&self, name: &str, payload: Value) -> DispatchResponse {
        let ctx = AgentContext::from_payload(&payload);

        match self.execute(name, payload, &ctx).await {
            Ok(ToolReply::Result(value)) => DispatchResponse::Success { result: value },
            Ok(ToolReply::Verdict(body)) => DispatchResponse::Verdict(body),
            Err(e) => {
                tracing::warn!(tool = name, code = ?e.code, error = %e.message, "Tool dispatch failed");
                DispatchResponse::failure(e.message)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    /// Execute a tool with timeout protection
    async fn execute(
        &self,
        name: &str,
        payload: Value,
        ctx: &AgentContext,
    ) -> Result<ToolReply, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::not_found(format!("Unknown tool: {}", name)))?;

        // Validate input
        tool.validate(&payload)?;

        let timeout_secs = tool.timeout_secs();
        let timeout_duration = Duration::from_secs(timeout_secs);

        tracing::trace!(
            tool = name,
            timeout_secs = timeout_secs,
            "Executing tool with timeout"
        );

        match tokio::time::timeout(timeout_duration, tool.execute(payload, ctx)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ToolError::timeout(name, timeout_secs)),
        }
    }

    fn list_tools(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    fn get_tool(&self, name: &str) -> Option<ToolSchema> {
        self.tools.get(name).map(|t| t.schema())
    }
}

/// Create the gateway registry with the full fixed catalog: the five
/// agent-backed tools plus identity verification against `patients`.
pub fn create_gateway_registry(patients: Arc<PatientRegistry>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(ValidationTool::new(patients));
    registry.register(AgentTool::new(Arc::new(ConcernsAgent::new())));
    registry.register(AgentTool::new(Arc::new(BenefitsAgent::new())));
    registry.register(AgentTool::new(Arc::new(RoutingAgent::new())));
    registry.register(AgentTool::new(Arc::new(PcpAppointmentAgent::new())));
    registry.register(AgentTool::new(Arc::new(SdohAgent::new())));

    tracing::info!(tool_count = registry.len(), "Created gateway tool registry");

    registry
}
