//! Tool catalog and dispatcher
//!
//! Exposes the gateway's fixed tool catalog behind a registry with a
//! uniform dispatch discipline: validate the payload, build the
//! per-call context, invoke the tool under its timeout, and normalize
//! the outcome into the response envelope. This boundary never lets a
//! collaborator failure escape raw.

pub mod agent_tool;
pub mod registry;
pub mod validation;

pub use agent_tool::AgentTool;
pub use registry::{
    create_gateway_registry, DispatchRequest, DispatchResponse, ToolExecutor, ToolRegistry,
    TOOL_NAMES,
};
pub use validation::ValidationTool;
