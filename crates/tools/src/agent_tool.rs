//! Agent-backed tools
//!
//! Adapts an opaque agent collaborator to the `Tool` interface. The
//! payload itself is not forwarded; the collaborator sees only the
//! per-call context the dispatcher built from it.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use outreach_agents::Agent;
use outreach_core::{
    AgentContext, InputSchema, PropertySchema, Tool, ToolError, ToolReply, ToolSchema,
};

/// Tool wrapper around one agent collaborator
pub struct AgentTool {
    agent: Arc<dyn Agent>,
}

impl AgentTool {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        self.agent.name()
    }

    fn description(&self) -> &str {
        self.agent.description()
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object().property(
                "user_response",
                PropertySchema::string("The caller's most recent utterance"),
                false,
            ),
        }
    }

    async fn execute(&self, _payload: Value, ctx: &AgentContext) -> Result<ToolReply, ToolError> {
        let reply = self.agent.run(ctx).await?;
        Ok(ToolReply::Result(reply.into_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_agents::{AgentError, AgentReply, RoutingAgent};

    struct FailingAgent;

    #[async_trait]
    impl Agent for FailingAgent {
        fn name(&self) -> &str {
            "failing"
        }
        fn description(&self) -> &str {
            "Always fails"
        }
        async fn run(&self, _ctx: &AgentContext) -> Result<AgentReply, AgentError> {
            Err(AgentError::Unavailable("backend offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_wraps_agent_reply_as_result() {
        let tool = AgentTool::new(Arc::new(RoutingAgent::new()));
        let reply = tool
            .execute(serde_json::json!({}), &AgentContext::new())
            .await
            .unwrap();
        match reply {
            ToolReply::Result(value) => assert!(value["message"].is_string()),
            other => panic!("expected result reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_agent_failure_becomes_tool_error() {
        let tool = AgentTool::new(Arc::new(FailingAgent));
        let err = tool
            .execute(serde_json::json!({}), &AgentContext::new())
            .await
            .unwrap_err();
        assert!(err.message.contains("backend offline"));
    }
}
