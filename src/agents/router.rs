//! Router agent for conditional routing based on input patterns.

use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::models::graph::Agent;
use crate::models::tools::ToolRegistryTrait;

/// Configuration for a routing rule
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Pattern to match (regex)
    pub pattern: String,
    /// Node ID to route to if pattern matches
    pub target_node: i32,
    /// Optional description of this route
    pub description: Option<String>,
}

impl RouteRule {
    pub fn new(pattern: impl Into<String>, target_node: i32) -> Self {
        Self {
            pattern: pattern.into(),
            target_node,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Router agent that hands its input, unchanged, to the first node whose
/// pattern matches.
///
/// # Example
/// ```rust
/// use agentdeck::agents::RouterAgent;
/// use agentdeck::agents::router::RouteRule;
///
/// let router = RouterAgent::new()
///     .add_route(RouteRule::new(r"\bhindi\b", 1).with_description("Hindi translations"))
///     .unwrap()
///     .add_route(RouteRule::new(r"\birish\b", 2))
///     .unwrap();
/// assert_eq!(router.find_route("Say hello in Irish"), Some(2));
/// assert_eq!(router.find_route("Say hello in French"), None);
/// ```
pub struct RouterAgent {
    routes: Vec<(Regex, RouteRule)>,
    name: String,
}

impl RouterAgent {
    /// Create a new router agent
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            name: "Router".to_string(),
        }
    }

    /// Add a routing rule. Patterns are compiled once, here, and match
    /// case-insensitively.
    pub fn add_route(mut self, rule: RouteRule) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&rule.pattern)
            .case_insensitive(true)
            .build()?;
        self.routes.push((regex, rule));
        Ok(self)
    }

    /// Set the agent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn matching_rule(&self, input: &str) -> Option<&RouteRule> {
        self.routes
            .iter()
            .find(|(regex, _)| regex.is_match(input))
            .map(|(_, rule)| rule)
    }

    /// Find the first matching route for the input
    pub fn find_route(&self, input: &str) -> Option<i32> {
        self.matching_rule(input).map(|rule| rule.target_node)
    }
}

impl Default for RouterAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for RouterAgent {
    async fn run(
        &mut self,
        input: &str,
        _tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
    ) -> (String, Option<i32>) {
        match self.matching_rule(input) {
            Some(rule) => {
                debug!(
                    router = %self.name,
                    node = rule.target_node,
                    route = rule.description.as_deref().unwrap_or(&rule.pattern),
                    "route matched"
                );
                (input.to_string(), Some(rule.target_node))
            }
            None => {
                debug!(router = %self.name, "no route matched");
                (format!("No matching route found for: {}", input), None)
            }
        }
    }

    fn get_name(&self) -> &str {
        &self.name
    }
}
