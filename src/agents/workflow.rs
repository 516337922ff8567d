//! Turns a declarative [`Workflow`] into a runnable [`Graph`].
//!
//! Node layout:
//! - `Single`: the agent at node 0.
//! - `Coordinator`: a router at node 0, sub-agents at 1..=n in declaration order.
//! - `Sequential`: stages at 0..n, then a validator at node n that checks at
//!   least one metric can be extracted from the last stage's output.

use std::sync::Arc;
use tracing::info;

use crate::agents::router::{RouteRule, RouterAgent};
use crate::agents::definition::{AgentSpec, Workflow};
use crate::agents::tool_agent::ToolAgent;
use crate::agents::validator::{ValidationRule, ValidatorAgent};
use crate::config::Config;
use crate::errors::{AgentDeckResult, ConfigError, ToolError};
use crate::models::graph::Graph;
use crate::tools::translate::{Translator, HINDI_TOOL_NAME, IRISH_TOOL_NAME};
use crate::tools::{register_builtin_tools, traffic, weather};

/// Pulls the place name out of "what's the weather in Dublin?".
pub const PLACE_PATTERN: &str = r"(?i)\b(?:in|for|at)\s+([\p{L} ]+?)\s*[?.!]*\s*$";

/// Pulls the phrase out of "translate 'good night' into Irish".
pub const TRANSLATE_PATTERN: &str = r#"(?i)^\s*(?:please\s+)?(?:translate|say)\s+["']?(.+?)["']?\s+(?:in|into|to)\s+(?:hindi|irish|gaeilge)\s*[?.!]*\s*$"#;

/// Name of the validator appended to sequential workflows.
pub const ANALYSIS_CHECK: &str = "analysis_check";

/// Build the graph for `workflow`, with every local tool registered in the
/// shared registry.
pub fn build_graph(
    workflow: &Workflow,
    config: &Config,
    translator: Arc<dyn Translator>,
) -> AgentDeckResult<Graph> {
    let mut graph = Graph::new();
    register_builtin_tools(graph.shared_tool_registry_mut(), config, translator);

    match workflow {
        Workflow::Single { agent } => {
            graph.add_node(0, Box::new(tool_agent(agent)?))?;
        }
        Workflow::Coordinator { root, delegations } => {
            let mut router = RouterAgent::new().with_name(root.name.clone());
            for delegation in delegations {
                let position = root
                    .sub_agents
                    .iter()
                    .position(|agent| agent.name == delegation.agent)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        name: "delegation".to_string(),
                        value: delegation.agent.clone(),
                    })?;
                router = router.add_route(
                    RouteRule::new(delegation.pattern.clone(), position as i32 + 1)
                        .with_description(format!("Delegate to {}", delegation.agent)),
                )?;
            }
            graph.add_node(0, Box::new(router))?;

            for (index, sub_agent) in root.sub_agents.iter().enumerate() {
                let id = index as i32 + 1;
                graph.add_node(id, Box::new(tool_agent(sub_agent)?))?;
                graph.add_edge(0, id)?;
            }
        }
        Workflow::Sequential { stages, .. } => {
            let check = stages.len() as i32;
            for (index, stage) in stages.iter().enumerate() {
                let id = index as i32;
                graph.add_node(id, Box::new(tool_agent(stage)?.with_next(id + 1)))?;
                if id > 0 {
                    graph.add_edge(id - 1, id)?;
                }
            }

            let validator = ValidatorAgent::new()
                .with_name(ANALYSIS_CHECK)
                .add_rule(ValidationRule::metrics_found());
            graph.add_node(check, Box::new(validator))?;
            if check > 0 {
                graph.add_edge(check - 1, check)?;
            }
        }
    }

    info!(workflow = workflow.name(), nodes = graph.len(), "workflow graph built");
    Ok(graph)
}

/// A tool-calling agent for `spec`. Agents with only framework tools have
/// nothing to run locally.
fn tool_agent(spec: &AgentSpec) -> AgentDeckResult<ToolAgent> {
    let mut local = spec.local_tools().peekable();
    if local.peek().is_none() {
        let tool = spec
            .tools
            .first()
            .map_or_else(|| spec.name.clone(), |tool| tool.name().to_string());
        return Err(ToolError::External(tool).into());
    }

    let mut agent = ToolAgent::new(spec.name.clone());
    let mut pattern = None;
    for tool in local {
        pattern = pattern.or_else(|| input_pattern_for(tool));
        agent = agent.with_tool(tool);
    }
    if let Some(pattern) = pattern {
        agent = agent.with_input_pattern(pattern)?;
    }
    Ok(agent)
}

fn input_pattern_for(tool: &str) -> Option<&'static str> {
    match tool {
        weather::TOOL_NAME | traffic::TOOL_NAME => Some(PLACE_PATTERN),
        HINDI_TOOL_NAME | IRISH_TOOL_NAME => Some(TRANSLATE_PATTERN),
        _ => None,
    }
}
