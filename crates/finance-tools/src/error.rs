//! Error types for tool operations.

use thiserror::Error;

/// Errors that can occur during tool execution.
///
/// The `Display` text of every variant is what the model sees when a call
/// fails, so messages are written as plain sentences.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The upstream request failed: transport error, non-2xx status or a
    /// body that is not JSON.
    #[error("Error fetching {domain} data: {message}")]
    Fetch {
        domain: &'static str,
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ToolError {
    /// Build a fetch error for the given data domain.
    pub fn fetch(domain: &'static str, message: impl ToString) -> Self {
        Self::Fetch {
            domain,
            message: message.to_string(),
        }
    }
}
