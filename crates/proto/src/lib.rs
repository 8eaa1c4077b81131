//! Shared protocol types for the tool handlers and the LLM layer.
//!
//! This crate defines serializable tool definition/result structures and
//! strongly-typed error enums shared across the workspace.

pub mod error;
pub mod failure;
pub mod tool;

/// Re-export of all protocol error types.
pub use error::*;
/// Re-export of the closed failure taxonomy returned by tool handlers.
pub use failure::{FailureKind, ToolFailure};
/// Re-export of tool definition and result types.
pub use tool::{ToolDefinition, ToolResult};
