//! ToolExecutor implementation backed by ToolRegistry.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use agent_core::{ToolExecutor, ToolRequest, ToolResult};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::ToolRegistry;

/// Controls which registry tools an agent host may call and how results
/// are shaped.
#[derive(Debug, Clone, Default)]
pub struct ToolPolicy {
    /// When set, only these tools may run.
    pub allowlist: Option<HashSet<String>>,
    /// Upper bound for one tool call, on top of the HTTP timeout.
    pub timeout: Option<Duration>,
    /// Wrap every result, errors included, as `{"tool", "success", "content"}`
    /// JSON.
    pub format_results_as_json: bool,
}

impl ToolPolicy {
    pub fn allow_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowlist = self.allowlist.get_or_insert_with(HashSet::new);
        for tool in tools {
            allowlist.insert(tool.into());
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_json_results(mut self, enabled: bool) -> Self {
        self.format_results_as_json = enabled;
        self
    }
}

/// Exposes a [`ToolRegistry`] to an agent host as a [`ToolExecutor`].
///
/// Every allowed call goes straight to the tool; nothing is cached.
pub struct RegistryToolExecutor {
    registry: Arc<ToolRegistry>,
    policy: ToolPolicy,
}

impl RegistryToolExecutor {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_policy(registry, ToolPolicy::default())
    }

    pub fn with_policy(registry: ToolRegistry, policy: ToolPolicy) -> Self {
        Self::from_shared(Arc::new(registry), policy)
    }

    pub fn from_shared(registry: Arc<ToolRegistry>, policy: ToolPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.registry.as_ref()
    }

    pub fn policy(&self) -> &ToolPolicy {
        &self.policy
    }

    fn is_allowed(&self, tool: &str) -> bool {
        match self.policy.allowlist {
            Some(ref allowlist) => allowlist.contains(tool),
            None => true,
        }
    }

    fn format_content(&self, tool: &str, success: bool, content: String) -> String {
        if self.policy.format_results_as_json {
            serde_json::json!({
                "tool": tool,
                "success": success,
                "content": content,
            })
            .to_string()
        } else {
            content
        }
    }

    fn failure(&self, request: &ToolRequest, message: impl Into<String>) -> ToolResult {
        let content = self.format_content(&request.name, false, message.into());
        ToolResult::error(&request.id, content)
    }
}

#[async_trait::async_trait]
impl ToolExecutor for RegistryToolExecutor {
    async fn execute(&self, mut request: ToolRequest) -> ToolResult {
        if !self.is_allowed(&request.name) {
            warn!("Tool '{}' blocked by policy", request.name);
            return self.failure(&request, "Tool not allowed");
        }

        debug!("Dispatching tool call {} ({})", request.id, request.name);

        let arguments = std::mem::take(&mut request.arguments);
        let execute_future = self.registry.execute(&request.name, arguments);

        let result = match self.policy.timeout {
            Some(timeout_duration) => match timeout(timeout_duration, execute_future).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Tool '{}' timed out", request.name);
                    return self.failure(&request, "Tool execution timed out");
                }
            },
            None => execute_future.await,
        };

        let output = match result {
            Ok(output) => output,
            Err(error) => return self.failure(&request, error.to_string()),
        };

        if output.success {
            let content = self.format_content(&request.name, true, output.content);
            ToolResult::success(&request.id, content)
        } else {
            self.failure(&request, output.content)
        }
    }

    fn supported_tools(&self) -> Vec<&str> {
        self.registry.list_tools()
    }
}
