//! Tool definitions and registries for function calling.
//!
//! This module provides the JSON-schema tool descriptions handed to the agent
//! framework, and the registries that dispatch its tool calls to local
//! implementations.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, warn};

use crate::errors::ToolError;

// -----------------------------
// Tool definitions
// -----------------------------

/// Represents a tool/function that can be called by an agent.
///
/// # Example
/// ```rust
/// use agentdeck::models::tools::Tool;
///
/// let tool = Tool::function("get_weather", "Retrieves weather information for a given city.")
///     .with_param("city_name", "string", "The name of the city", true);
/// assert_eq!(tool.function.parameters.required, vec!["city_name"]);
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Tool {
    /// The type of tool (typically "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// The function definition
    pub function: Function,
}

/// Defines a function that can be called by an agent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Function {
    /// The name of the function
    pub name: String,
    /// A description of what the function does
    pub description: String,
    /// The parameters that the function accepts
    pub parameters: Parameters,
}

/// Defines the parameters for a function.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Parameters {
    /// The type of parameters (typically "object")
    #[serde(rename = "type")]
    pub param_type: String,
    /// Map of parameter names to their properties
    pub properties: HashMap<String, Property>,
    /// List of required parameter names
    pub required: Vec<String>,
}

/// Defines a single parameter property.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Property {
    /// The type of the property (e.g., "string", "number", "array")
    #[serde(rename = "type")]
    pub prop_type: String,
    /// Optional description of the property
    pub description: Option<String>,
    /// For array types, defines the items in the array
    pub items: Option<Box<Property>>,
}

impl Tool {
    /// Start a function tool with no parameters.
    pub fn function(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: Function {
                name: name.into(),
                description: description.into(),
                parameters: Parameters {
                    param_type: "object".to_string(),
                    properties: HashMap::new(),
                    required: Vec::new(),
                },
            },
        }
    }

    /// Add a parameter to the tool's schema.
    pub fn with_param(
        mut self,
        name: impl Into<String>,
        prop_type: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.function.parameters.properties.insert(
            name.clone(),
            Property {
                prop_type: prop_type.into(),
                description: Some(description.into()),
                items: None,
            },
        );
        if required {
            self.function.parameters.required.push(name);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Represents a tool call request from the agent framework.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// The type of call (typically "function")
    #[serde(rename = "type")]
    pub call_type: String,
    /// The function call details
    pub function: FunctionCall,
}

/// Details of a function call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FunctionCall {
    /// The name of the function to call
    pub name: String,
    /// The arguments as a JSON string
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: &Value) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.to_string(),
            },
        }
    }
}

/// The answer to a [`ToolCall`], ready to hand back to the framework.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolResultMessage {
    pub role: String,
    #[serde(rename = "tool_call_id")]
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
}

// -----------------------------
// Tool Registry Trait
// -----------------------------
/// Trait for implementing tool registries.
///
/// A tool registry manages available tools and their execution.
#[async_trait]
pub trait ToolRegistryTrait: Send + Sync {
    /// Get all available tools in this registry.
    fn get_tools(&self) -> Vec<Tool>;

    /// Whether a tool with this name is registered.
    fn has_tool(&self, name: &str) -> bool {
        self.get_tools().iter().any(|t| t.function.name == name)
    }

    /// Execute a tool by name with the given arguments.
    ///
    /// # Arguments
    /// * `name` - The name of the tool to execute
    /// * `arguments` - JSON string containing the arguments
    async fn execute_tool(&self, name: &str, arguments: &str) -> Result<Value, ToolError>;

    /// Execute a framework tool call and wrap the outcome as a tool message.
    ///
    /// Failures are reported in the message content rather than returned,
    /// so the caller can pass them back to the model.
    async fn dispatch(&self, call: &ToolCall) -> ToolResultMessage {
        let content = match self
            .execute_tool(&call.function.name, &call.function.arguments)
            .await
        {
            Ok(Value::String(text)) => text,
            Ok(result) => result.to_string(),
            Err(e) => {
                warn!(tool = %call.function.name, error = %e, "tool call failed");
                format!("Error: {}", e)
            }
        };
        ToolResultMessage {
            role: "tool".to_string(),
            tool_call_id: call.id.clone(),
            name: call.function.name.clone(),
            content,
        }
    }
}

// -----------------------------
// Tool Registry Implementation
// -----------------------------
/// Type alias for tool functions.
pub type ToolFunction = dyn Fn(Value) -> BoxFuture<'static, Result<Value, String>> + Send + Sync;

/// A registry for managing tools and their implementations.
///
/// # Example
/// ```rust
/// use agentdeck::models::tools::{Tool, ToolRegistry, ToolRegistryTrait};
///
/// let mut registry = ToolRegistry::new();
/// registry.register_tool(Tool::function("ping", "Answers pong"), |_args| {
///     Ok(serde_json::json!("pong"))
/// });
/// assert!(registry.has_tool("ping"));
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
    functions: HashMap<String, Box<ToolFunction>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            functions: HashMap::new(),
        }
    }

    /// Register a tool with a synchronous implementation.
    ///
    /// A tool registered under an existing name replaces it.
    pub fn register_tool<F>(&mut self, tool: Tool, function: F)
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.insert(
            tool,
            Box::new(move |args: Value| -> BoxFuture<'static, Result<Value, String>> {
                futures::future::ready(function(args)).boxed()
            }),
        );
    }

    /// Register a tool whose implementation awaits, e.g. a remote call.
    pub fn register_async_tool<F, Fut>(&mut self, tool: Tool, function: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + Send + 'static,
    {
        self.insert(
            tool,
            Box::new(move |args: Value| -> BoxFuture<'static, Result<Value, String>> {
                function(args).boxed()
            }),
        );
    }

    fn insert(&mut self, tool: Tool, function: Box<ToolFunction>) {
        let name = tool.function.name.clone();
        debug!(tool = %name, "registering tool");
        self.tools.insert(name.clone(), tool);
        self.functions.insert(name, function);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[async_trait]
impl ToolRegistryTrait for ToolRegistry {
    fn get_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self.tools.values().cloned().collect();
        tools.sort_by(|a, b| a.function.name.cmp(&b.function.name));
        tools
    }

    fn has_tool(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    async fn execute_tool(&self, name: &str, arguments: &str) -> Result<Value, ToolError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        let args: Value = serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments {
            name: name.to_string(),
            error: e.to_string(),
        })?;

        debug!(tool = %name, "executing tool");
        function(args)
            .await
            .map_err(|error| ToolError::ToolExecutionFailed {
                name: name.to_string(),
                error,
            })
    }
}

// -----------------------------
// Combined Tool Registry
// -----------------------------
/// A registry that combines two tool registries.
///
/// The primary registry takes precedence over the secondary registry
/// when tools have the same name.
pub struct CombinedToolRegistry<'a> {
    primary: &'a dyn ToolRegistryTrait,
    secondary: &'a dyn ToolRegistryTrait,
}

impl<'a> CombinedToolRegistry<'a> {
    /// Create a new combined registry.
    ///
    /// # Arguments
    /// * `primary` - The primary registry (higher priority)
    /// * `secondary` - The secondary registry (lower priority)
    pub fn new(primary: &'a dyn ToolRegistryTrait, secondary: &'a dyn ToolRegistryTrait) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl<'a> ToolRegistryTrait for CombinedToolRegistry<'a> {
    fn get_tools(&self) -> Vec<Tool> {
        let mut tools = self.secondary.get_tools();
        let primary_tools = self.primary.get_tools();

        // Remove duplicates from secondary
        tools.retain(|tool| {
            !primary_tools.iter().any(|t| t.function.name == tool.function.name)
        });

        // Add primary tools (take precedence)
        tools.extend(primary_tools);
        tools
    }

    fn has_tool(&self, name: &str) -> bool {
        self.primary.has_tool(name) || self.secondary.has_tool(name)
    }

    async fn execute_tool(&self, name: &str, arguments: &str) -> Result<Value, ToolError> {
        if self.primary.has_tool(name) {
            return self.primary.execute_tool(name, arguments).await;
        }
        self.secondary.execute_tool(name, arguments).await
    }
}
