//! Per-call invocation context
//!
//! Each dispatch builds one `AgentContext` from the request payload and
//! passes it to the target collaborator. The context carries the most
//! recent user utterance for that call only; there is no process-wide
//! slot shared between concurrent dispatches.

use serde_json::Value;

/// Conversational context for a single tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentContext {
    user_response: Option<String>,
}

impl AgentContext {
    /// Create an empty context (no pending user response)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context carrying a user response
    pub fn with_user_response(response: impl Into<String>) -> Self {
        Self {
            user_response: Some(response.into()),
        }
    }

    /// Build a context from a tool payload.
    ///
    /// Picks up `user_response` only when it is a non-empty string.
    pub fn from_payload(payload: &Value) -> Self {
        let user_response = payload
            .get("user_response")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Self { user_response }
    }

    /// The user's most recent utterance for this call, if any
    pub fn user_response(&self) -> Option<&str> {
        self.user_response.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_with_response() {
        let ctx = AgentContext::from_payload(&json!({"user_response": "yes"}));
        assert_eq!(ctx.user_response(), Some("yes"));
    }

    #[test]
    fn test_from_payload_empty_response_ignored() {
        let ctx = AgentContext::from_payload(&json!({"user_response": ""}));
        assert_eq!(ctx.user_response(), None);
    }

    #[test]
    fn test_from_payload_missing_response() {
        let ctx = AgentContext::from_payload(&json!({"other": 1}));
        assert_eq!(ctx.user_response(), None);
    }

    #[test]
    fn test_from_payload_non_string_ignored() {
        let ctx = AgentContext::from_payload(&json!({"user_response": 42}));
        assert_eq!(ctx.user_response(), None);
    }
}
