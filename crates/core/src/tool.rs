//! Tool interface
//!
//! MCP-compatible tool surface: every gateway capability is a named,
//! schema-described tool invoked with a JSON payload. Execution is
//! fallible but the failure type is structured; callers above the
//! dispatcher never see a raw error.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::context::AgentContext;

/// Error codes for tool failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Payload missing or malformed fields
    InvalidParams,
    /// Tool (or a referenced entity) does not exist
    NotFound,
    /// Execution exceeded the tool's timeout
    Timeout,
    /// Collaborator or infrastructure failure
    Internal,
}

/// Structured tool execution error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ToolError {
    /// Error classification
    pub code: ErrorCode,
    /// Human-readable description, always non-empty
    pub message: String,
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidParams,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::NotFound,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: message.into(),
        }
    }

    pub fn timeout(tool: &str, secs: u64) -> Self {
        Self {
            code: ErrorCode::Timeout,
            message: format!("Tool '{}' timed out after {}s", tool, secs),
        }
    }
}

/// Property schema for a single payload field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySchema {
    /// JSON type name ("string", "object", ...)
    #[serde(rename = "type")]
    pub property_type: String,
    /// Human-readable description
    pub description: String,
    /// Allowed values for enum-typed properties
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertySchema {
    /// Free-form string property
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            property_type: "string".to_string(),
            description: description.into(),
            enum_values: None,
        }
    }

    /// String property restricted to a fixed set of values
    pub fn enum_type(description: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            property_type: "string".to_string(),
            description: description.into(),
            enum_values: Some(values),
        }
    }
}

/// Input schema for a tool payload (JSON-Schema shaped)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Ordered so schema listings are stable across runs
    pub properties: BTreeMap<String, PropertySchema>,
    pub required: Vec<String>,
}

impl InputSchema {
    /// Start an object schema
    pub fn object() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property; `required` marks it mandatory
    pub fn property(
        mut self,
        name: impl Into<String>,
        schema: PropertySchema,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    /// Check a payload against the required-property list
    pub fn validate(&self, payload: &Value) -> Result<(), ToolError> {
        if !payload.is_object() {
            return Err(ToolError::invalid_params("payload must be an object"));
        }
        for name in &self.required {
            match payload.get(name) {
                Some(Value::Null) | None => {
                    return Err(ToolError::invalid_params(format!(
                        "{} is required",
                        name
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Tool descriptor for discovery/listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// Reply from a successful tool execution.
///
/// Discriminated so the dispatcher can shape the response without
/// inspecting opaque values: collaborator results get the generic
/// `{"result": ...}` envelope, verdicts are serialized whole.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolReply {
    /// Opaque collaborator result
    Result(Value),
    /// Pre-shaped verdict body (identity verification)
    Verdict(Value),
}

/// A named, invocable gateway capability
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (stable identifier in the catalog)
    fn name(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Payload schema for discovery
    fn schema(&self) -> ToolSchema;

    /// Validate a payload before execution.
    ///
    /// The default checks required properties from the schema. Tools
    /// with softer contracts (the verdict-returning ones) override it.
    fn validate(&self, payload: &Value) -> Result<(), ToolError> {
        self.schema().input_schema.validate(payload)
    }

    /// Execute with the given payload and per-call context
    async fn execute(&self, payload: Value, ctx: &AgentContext) -> Result<ToolReply, ToolError>;

    /// Execution timeout; the dispatcher aborts past this
    fn timeout_secs(&self) -> u64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_schema_builder() {
        let schema = InputSchema::object()
            .property("full_name", PropertySchema::string("Patient full name"), true)
            .property("dob", PropertySchema::string("Date of birth"), true)
            .property("user_response", PropertySchema::string("Latest utterance"), false);

        assert_eq!(schema.required, vec!["full_name", "dob"]);
        assert_eq!(schema.properties.len(), 3);
    }

    #[test]
    fn test_input_schema_serializes_like_json_schema() {
        let schema = InputSchema::object().property(
            "choice",
            PropertySchema::enum_type("Pick one", vec!["a".into(), "b".into()]),
            true,
        );
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value["type"], "object");
        assert_eq!(value["properties"]["choice"]["enum"], json!(["a", "b"]));
        assert_eq!(value["required"], json!(["choice"]));
    }

    #[test]
    fn test_validate_missing_required() {
        let schema = InputSchema::object().property(
            "full_name",
            PropertySchema::string("Patient full name"),
            true,
        );
        let err = schema.validate(&json!({})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
        assert!(err.message.contains("full_name"));
    }

    #[test]
    fn test_validate_null_counts_as_missing() {
        let schema = InputSchema::object().property(
            "dob",
            PropertySchema::string("Date of birth"),
            true,
        );
        assert!(schema.validate(&json!({"dob": null})).is_err());
        assert!(schema.validate(&json!({"dob": "1990-01-01"})).is_ok());
    }

    #[test]
    fn test_tool_error_display_is_message() {
        let err = ToolError::timeout("concerns", 30);
        assert_eq!(err.to_string(), "Tool 'concerns' timed out after 30s");
        assert!(!err.message.is_empty());
    }
}
