//! Tool-calling contract between an agent host and the tools it drives.
//!
//! The agent host (planning loop, model invocation, chat UI) lives outside
//! this workspace. This crate defines the narrow surface it talks to:
//!
//! - [`ToolDefinition`] - Function-calling descriptor sent to the model
//! - [`ToolRequest`] / [`ToolResult`] - One tool call and its outcome
//! - [`ToolExecutor`] - Trait the host calls to run a tool
//!
//! # Example
//!
//! ```rust
//! use agent_core::{async_trait, ToolExecutor, ToolRequest, ToolResult};
//!
//! struct EchoExecutor;
//!
//! #[async_trait]
//! impl ToolExecutor for EchoExecutor {
//!     async fn execute(&self, request: ToolRequest) -> ToolResult {
//!         match request.require_string("text") {
//!             Ok(text) => ToolResult::success(&request.id, text),
//!             Err(e) => ToolResult::error(&request.id, e),
//!         }
//!     }
//!
//!     fn supported_tools(&self) -> Vec<&str> {
//!         vec!["echo"]
//!     }
//! }
//! ```

mod definition;
mod tools;

pub use definition::{FunctionDefinition, ToolDefinition};
pub use tools::{ToolExecutor, ToolRequest, ToolResult};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
