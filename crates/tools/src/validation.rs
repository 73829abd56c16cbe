//! Identity Verification Tool
//!
//! The one tool with a stricter contract than the generic envelope:
//! it always answers with a validation verdict. Missing query fields
//! are a caller error reported inside the verdict, never a
//! dispatcher-level failure.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use outreach_core::{
    AgentContext, InputSchema, PropertySchema, Tool, ToolError, ToolReply, ToolSchema,
};
use outreach_registry::{IdentityMatcher, PatientRegistry};

/// Patient identity verification against the registry
pub struct ValidationTool {
    matcher: IdentityMatcher,
}

impl ValidationTool {
    pub fn new(registry: Arc<PatientRegistry>) -> Self {
        Self {
            matcher: IdentityMatcher::new(registry),
        }
    }

    fn field<'a>(payload: &'a Value, name: &str) -> &'a str {
        payload.get(name).and_then(|v| v.as_str()).unwrap_or("")
    }
}

#[async_trait]
impl Tool for ValidationTool {
    fn name(&self) -> &str {
        "validation"
    }

    fn description(&self) -> &str {
        "Validates patient information against records"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: InputSchema::object()
                .property("full_name", PropertySchema::string("Patient full name"), true)
                .property("dob", PropertySchema::string("Date of birth"), true),
        }
    }

    /// Missing fields are answered with an invalid verdict, so payload
    /// checking is deferred to execution.
    fn validate(&self, _payload: &Value) -> Result<(), ToolError> {
        Ok(())
    }

    async fn execute(&self, payload: Value, _ctx: &AgentContext) -> Result<ToolReply, ToolError> {
        let full_name = Self::field(&payload, "full_name");
        let dob = Self::field(&payload, "dob");

        let verdict = self.matcher.validate(full_name, dob);
        let body = serde_json::to_value(verdict)
            .map_err(|e| ToolError::internal(format!("Failed to encode verdict: {}", e)))?;
        Ok(ToolReply::Verdict(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_registry::PatientRecord;
    use serde_json::json;

    fn tool() -> ValidationTool {
        let registry = PatientRegistry::with_records(vec![PatientRecord {
            member_id: "M1".to_string(),
            full_name: "Jane Doe".to_string(),
            dob: "1990-01-01".to_string(),
            phone_number: "555-0100".to_string(),
            pcp_name: "Dr. Patel".to_string(),
            pcp_appointment_date: None,
        }]);
        ValidationTool::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_match_returns_verdict_reply() {
        let reply = tool()
            .execute(
                json!({"full_name": "Jane Doe", "dob": "1990-01-01"}),
                &AgentContext::new(),
            )
            .await
            .unwrap();
        match reply {
            ToolReply::Verdict(body) => {
                assert_eq!(body["valid"], true);
                assert_eq!(body["patient_info"]["member_id"], "M1");
            }
            other => panic!("expected verdict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_fields_are_a_verdict_not_an_error() {
        let reply = tool()
            .execute(json!({"dob": "1990-01-01"}), &AgentContext::new())
            .await
            .unwrap();
        match reply {
            ToolReply::Verdict(body) => {
                assert_eq!(body["valid"], false);
                assert_eq!(body["message"], "Both full_name and dob are required");
            }
            other => panic!("expected verdict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_string_fields_count_as_missing() {
        let reply = tool()
            .execute(
                json!({"full_name": 42, "dob": "1990-01-01"}),
                &AgentContext::new(),
            )
            .await
            .unwrap();
        match reply {
            ToolReply::Verdict(body) => assert_eq!(body["valid"], false),
            other => panic!("expected verdict, got {:?}", other),
        }
    }
}
