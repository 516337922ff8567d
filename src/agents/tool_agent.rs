//! Agent that answers by calling registered tools.

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::errors::ToolError;
use crate::models::graph::Agent;
use crate::models::tools::ToolRegistryTrait;

/// Calls each of its tools in turn with an argument taken from the input.
///
/// The argument is the first capture group of the input pattern, or the
/// whole trimmed input when there is no pattern or it does not match. It is
/// bound to the tool's first required parameter. String parameters receive
/// it verbatim; any other type must parse as JSON.
///
/// The output holds one line per tool. String results are used as-is and
/// anything else is rendered as compact JSON.
pub struct ToolAgent {
    name: String,
    tools: Vec<String>,
    input_pattern: Option<Regex>,
    next: Option<i32>,
}

impl ToolAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tools: Vec::new(),
            input_pattern: None,
            next: None,
        }
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tools.push(tool.into());
        self
    }

    pub fn with_input_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.input_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    /// Route the output to `node_id` after a successful run.
    pub fn with_next(mut self, node_id: i32) -> Self {
        self.next = Some(node_id);
        self
    }

    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    fn argument<'a>(&self, input: &'a str) -> &'a str {
        self.input_pattern
            .as_ref()
            .and_then(|re| re.captures(input))
            .and_then(|caps| caps.get(1))
            .map_or(input, |m| m.as_str())
            .trim()
    }

    fn arguments_for(
        &self,
        tool: &str,
        argument: &str,
        registry: &(dyn ToolRegistryTrait + Send + Sync),
    ) -> Result<String, ToolError> {
        let schema = registry
            .get_tools()
            .into_iter()
            .find(|t| t.function.name == tool)
            .ok_or_else(|| ToolError::ToolNotFound(tool.to_string()))?;

        let mut args = Map::new();
        if let Some(param) = schema.function.parameters.required.first() {
            let is_string = schema
                .function
                .parameters
                .properties
                .get(param)
                .map_or(true, |p| p.prop_type == "string");
            let value = if is_string {
                Value::String(argument.to_string())
            } else {
                serde_json::from_str(argument).map_err(|e| ToolError::InvalidArguments {
                    name: tool.to_string(),
                    error: format!("'{}' must be JSON: {}", param, e),
                })?
            };
            args.insert(param.clone(), value);
        }
        Ok(Value::Object(args).to_string())
    }

    async fn call(
        &self,
        tool: &str,
        argument: &str,
        registry: &(dyn ToolRegistryTrait + Send + Sync),
    ) -> Result<String, ToolError> {
        let arguments = self.arguments_for(tool, argument, registry)?;
        debug!(agent = %self.name, tool, "calling tool");
        match registry.execute_tool(tool, &arguments).await? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn run(
        &mut self,
        input: &str,
        tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
    ) -> (String, Option<i32>) {
        let argument = self.argument(input);
        let mut outputs = Vec::with_capacity(self.tools.len());

        for tool in &self.tools {
            match self.call(tool, argument, tool_registry).await {
                Ok(output) => outputs.push(output),
                Err(e) => {
                    warn!(agent = %self.name, tool = %tool, error = %e, "tool call failed");
                    return (format!("Error: {}", e), None);
                }
            }
        }

        (outputs.join("\n"), self.next)
    }

    fn get_name(&self) -> &str {
        &self.name
    }
}
