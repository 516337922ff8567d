//! Graph-based multi-agent runtime.
//!
//! This module provides the agent trait and the graph that wires agents
//! into pipelines and delegation trees. Each agent returns its output and,
//! optionally, the id of the node that should receive that output next.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::errors::NodeError;
use crate::models::tools::{CombinedToolRegistry, Tool, ToolRegistry, ToolRegistryTrait};

/// Trait for implementing agents that can process inputs and communicate within the graph.
///
/// # Example
/// ```rust
/// use async_trait::async_trait;
/// use agentdeck::models::graph::Agent;
/// use agentdeck::models::tools::ToolRegistryTrait;
///
/// pub struct MyAgent;
///
/// #[async_trait]
/// impl Agent for MyAgent {
///     async fn run(
///         &mut self,
///         input: &str,
///         tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
///     ) -> (String, Option<i32>) {
///         let response = format!("Processed: {}", input);
///         (response, None) // None ends the chain
///     }
///
///     fn get_name(&self) -> &str {
///         "MyAgent"
///     }
/// }
/// ```
#[async_trait]
pub trait Agent: Send {
    /// Process input and optionally route to the next agent.
    ///
    /// # Returns
    /// A tuple containing:
    /// * `String` - The processed output
    /// * `Option<i32>` - The ID of the next agent to route to (None terminates)
    async fn run(
        &mut self,
        input: &str,
        tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
    ) -> (String, Option<i32>);

    /// Get the name of this agent for identification purposes.
    fn get_name(&self) -> &str;
}

/// Hops allowed in one run before the graph stops following routes.
pub const DEFAULT_MAX_HOPS: usize = 32;

/// A directed graph of agents that can communicate and pass messages.
///
/// The graph supports:
/// - Agent registration under integer node ids
/// - Tool registration (both global and node-specific)
/// - Message passing along the routes agents return
///
/// # Example
/// ```rust
/// use agentdeck::{Agent, Graph, ToolRegistryTrait};
/// use async_trait::async_trait;
///
/// struct SimpleAgent;
///
/// #[async_trait]
/// impl Agent for SimpleAgent {
///     async fn run(&mut self, input: &str, _: &(dyn ToolRegistryTrait + Send + Sync)) -> (String, Option<i32>) {
///         (format!("Processed: {}", input), None)
///     }
///     fn get_name(&self) -> &str { "Simple" }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let mut graph = Graph::new();
///     graph.add_node(0, Box::new(SimpleAgent)).unwrap();
///     let result = graph.run(0, "Hello").await;
///     assert_eq!(result, "Processed: Hello\n");
/// }
/// ```
pub struct Graph {
    nodes: BTreeMap<i32, Node>,
    tool_registry: ToolRegistry,
    max_hops: usize,
}

struct Node {
    agent: Box<dyn Agent>,
    neighbors: Vec<i32>,
    tool_registry: ToolRegistry,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            tool_registry: ToolRegistry::new(),
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Limit how many agents one run may visit.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Register a tool globally (available to all agents).
    pub fn register_tool<F>(&mut self, tool: Tool, function: F)
    where
        F: Fn(serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync + 'static,
    {
        self.tool_registry.register_tool(tool, function);
    }

    /// Register a tool for a specific node only.
    ///
    /// Node tools shadow global tools with the same name.
    pub fn register_tool_for_node<F>(
        &mut self,
        node_id: i32,
        tool: Tool,
        function: F,
    ) -> Result<(), NodeError>
    where
        F: Fn(serde_json::Value) -> Result<serde_json::Value, String> + Send + Sync + 'static,
    {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(NodeError::NodeNotFound(node_id))?;
        node.tool_registry.register_tool(tool, function);
        Ok(())
    }

    /// Get the tool registry for a specific node.
    pub fn get_node_tool_registry(&self, node_id: i32) -> Option<&ToolRegistry> {
        self.nodes.get(&node_id).map(|node| &node.tool_registry)
    }

    /// Get the shared global tool registry.
    pub fn get_shared_tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Mutable access to the shared registry, for bulk registration.
    pub fn shared_tool_registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.tool_registry
    }

    /// Add a new agent node to the graph.
    pub fn add_node(&mut self, id: i32, agent: Box<dyn Agent>) -> Result<(), NodeError> {
        if self.nodes.contains_key(&id) {
            return Err(NodeError::NodeAlreadyExists(id));
        }
        debug!(node = id, agent = agent.get_name(), "adding node");
        self.nodes.insert(
            id,
            Node {
                agent,
                neighbors: Vec::new(),
                tool_registry: ToolRegistry::new(),
            },
        );
        Ok(())
    }

    /// Add a bidirectional edge between two nodes.
    pub fn add_edge(&mut self, u: i32, v: i32) -> Result<(), NodeError> {
        if !self.nodes.contains_key(&u) || !self.nodes.contains_key(&v) {
            return Err(NodeError::InvalidEdge { from: u, to: v });
        }

        if let Some(node) = self.nodes.get_mut(&u) {
            if !node.neighbors.contains(&v) {
                node.neighbors.push(v);
            }
        }

        if let Some(node) = self.nodes.get_mut(&v) {
            if !node.neighbors.contains(&u) {
                node.neighbors.push(u);
            }
        }

        Ok(())
    }

    pub fn neighbors(&self, id: i32) -> Option<&[i32]> {
        self.nodes.get(&id).map(|node| node.neighbors.as_slice())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adjacency list, one line per node in id order.
    ///
    /// ```text
    /// 0 (Agent: coordination_agent) -> 1 2
    /// 1 (Agent: language_agent_1) -> 0
    /// ```
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (id, node) in &self.nodes {
            let neighbors: Vec<String> = node.neighbors.iter().map(|n| n.to_string()).collect();
            out.push_str(&format!(
                "{} (Agent: {}) -> {}\n",
                id,
                node.agent.get_name(),
                neighbors.join(" ")
            ));
        }
        out
    }

    /// Execute the graph starting from a specific node.
    ///
    /// Each agent's output becomes the next agent's input. Execution stops
    /// when an agent returns no route, a route names a missing node, or the
    /// hop limit is reached. The result holds every agent's output, one per
    /// line, plus an error line if the run was cut short.
    pub async fn run(&mut self, start_id: i32, input: &str) -> String {
        let mut current_id = start_id;
        let mut current_input = input.to_string();
        let mut result = String::new();
        let mut hops = 0;

        let Graph {
            nodes,
            tool_registry: shared,
            max_hops,
        } = self;

        if !nodes.contains_key(&start_id) {
            warn!(node = start_id, "start node missing");
            result.push_str(&format!("Error: {}\n", NodeError::NodeNotFound(start_id)));
            return result;
        }

        loop {
            if hops == *max_hops {
                warn!(hops, "hop limit reached");
                result.push_str(&format!("Error: hop limit of {} reached\n", max_hops));
                break;
            }
            hops += 1;

            let Some(node) = nodes.get_mut(&current_id) else {
                break;
            };
            let Node {
                agent,
                tool_registry: local,
                ..
            } = node;

            info!(node = current_id, agent = agent.get_name(), "running agent");
            let combined = CombinedToolRegistry::new(&*local, &*shared);
            let (output, next_id) = agent.run(&current_input, &combined).await;

            result.push_str(&output);
            result.push('\n');

            match next_id {
                Some(next) if nodes.contains_key(&next) => {
                    debug!(from = current_id, to = next, "routing");
                    current_id = next;
                    current_input = output;
                }
                Some(next) => {
                    warn!(node = next, "route target missing");
                    result.push_str(&format!("Error: {}\n", NodeError::NodeNotFound(next)));
                    break;
                }
                None => break,
            }
        }

        result
    }
}
