//! Core traits and types for the outreach gateway
//!
//! This crate provides foundational types used across all other crates:
//! - The `Tool` trait and its schema/output/error types
//! - The per-call `AgentContext` threaded from dispatch into collaborators

pub mod context;
pub mod tool;

pub use context::AgentContext;
pub use tool::{
    ErrorCode, InputSchema, PropertySchema, Tool, ToolError, ToolReply, ToolSchema,
};
