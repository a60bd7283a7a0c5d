//! Tool trait definition and types.

use std::collections::HashMap;
use std::fmt;

use agent_core::ToolDefinition;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::ToolError;

/// JSON type of a tool input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
}

impl ValueType {
    /// Name used in JSON Schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            ValueType::String => value.is_string(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared input of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolInput {
    pub name: &'static str,
    pub value_type: ValueType,
    pub description: &'static str,
}

impl ToolInput {
    /// Declare a required string input.
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            value_type: ValueType::String,
            description,
        }
    }
}

/// Arguments passed to a tool for execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Parameters as key-value pairs.
    pub params: HashMap<String, Value>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: HashMap<String, Value>) -> Self {
        Self { params }
    }

    /// Build arguments from `(name, value)` string pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let params = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { params }
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.params
            .get(key)
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "expected string".to_string(),
            })
    }

    /// Check every declared input is present with the declared type.
    ///
    /// Inputs are checked in declaration order so the first problem reported
    /// is stable. Extra parameters are ignored.
    pub fn check_inputs(&self, inputs: &[ToolInput]) -> Result<(), ToolError> {
        for input in inputs {
            let value = self
                .params
                .get(input.name)
                .ok_or_else(|| ToolError::MissingParameter(input.name.to_string()))?;
            if !input.value_type.matches(value) {
                return Err(ToolError::InvalidParameter {
                    name: input.name.to_string(),
                    reason: format!("expected {}", input.value_type),
                });
            }
        }
        Ok(())
    }
}

/// Output from a tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result content.
    pub content: String,
    /// Whether the lookup found what was asked for.
    pub success: bool,
}

impl ToolOutput {
    /// Create a successful output.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: true,
        }
    }

    /// Create a failed output (e.g. nothing found upstream).
    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            success: false,
        }
    }
}

/// A finance lookup that an agent host can describe to a model and call.
///
/// Implementors provide the static descriptor (`name`, `description`,
/// `inputs`) and `execute`. Hosts should call [`Tool::forward`], which
/// checks arguments and turns every error into text.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for dispatch).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Declared inputs, in order.
    fn inputs(&self) -> &[ToolInput];

    /// Type of the value returned by `forward`.
    fn output_type(&self) -> ValueType {
        ValueType::String
    }

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;

    /// JSON Schema object describing `inputs`.
    fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for input in self.inputs() {
            properties.insert(
                input.name.to_string(),
                json!({
                    "type": input.value_type.as_str(),
                    "description": input.description,
                }),
            );
            required.push(Value::String(input.name.to_string()));
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Function-calling definition for the agent host.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(self.name(), self.description(), self.parameters_schema())
    }

    /// Run the tool and return its text, whatever happens.
    async fn forward(&self, args: ToolArgs) -> String {
        let result = match args.check_inputs(self.inputs()) {
            Ok(()) => self.execute(args).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(output) => output.content,
            Err(e) => {
                warn!("Tool '{}' failed: {}", self.name(), e);
                e.to_string()
            }
        }
    }
}
