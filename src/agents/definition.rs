//! Declarative agent configuration.
//!
//! An [`AgentSpec`] is what the agent framework needs to host an agent:
//! a name, a model, an instruction and the tools it may call. A
//! [`Workflow`] says how several specs cooperate.

use serde::{Deserialize, Serialize};

/// A tool an agent may call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ToolRef {
    /// Implemented in this crate and registered in a [`ToolRegistry`](crate::ToolRegistry).
    Local(String),
    /// Provided by the agent framework (web search, map grounding).
    External(String),
}

impl ToolRef {
    pub fn local(name: impl Into<String>) -> Self {
        ToolRef::Local(name.into())
    }

    pub fn external(name: impl Into<String>) -> Self {
        ToolRef::External(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            ToolRef::Local(name) | ToolRef::External(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub instruction: String,
    #[serde(default)]
    pub tools: Vec<ToolRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_agents: Vec<AgentSpec>,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            description: None,
            instruction: String::new(),
            tools: Vec::new(),
            sub_agents: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn with_tool(mut self, tool: ToolRef) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_sub_agent(mut self, agent: AgentSpec) -> Self {
        self.sub_agents.push(agent);
        self
    }

    /// Names of the tools implemented in this crate.
    pub fn local_tools(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().filter_map(|tool| match tool {
            ToolRef::Local(name) => Some(name.as_str()),
            ToolRef::External(_) => None,
        })
    }

    /// Find this agent or one of its descendants by name.
    pub fn find(&self, name: &str) -> Option<&AgentSpec> {
        if self.name == name {
            return Some(self);
        }
        self.sub_agents.iter().find_map(|agent| agent.find(name))
    }
}

/// Routes a coordinator sends to its sub-agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// Case-insensitive regex matched against the user's request
    pub pattern: String,
    /// Name of the sub-agent that handles matching requests
    pub agent: String,
}

/// How the agents of one configuration cooperate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Workflow {
    /// One agent answering directly with its tools.
    Single { agent: AgentSpec },
    /// Each stage receives the previous stage's output.
    Sequential { name: String, stages: Vec<AgentSpec> },
    /// The root agent hands each request to at most one sub-agent.
    Coordinator {
        root: AgentSpec,
        delegations: Vec<Delegation>,
    },
}

impl Workflow {
    pub fn name(&self) -> &str {
        match self {
            Workflow::Single { agent } => &agent.name,
            Workflow::Sequential { name, .. } => name,
            Workflow::Coordinator { root, .. } => &root.name,
        }
    }

    /// Every agent taking part, in execution order.
    pub fn agents(&self) -> Vec<&AgentSpec> {
        match self {
            Workflow::Single { agent } => vec![agent],
            Workflow::Sequential { stages, .. } => stages.iter().collect(),
            Workflow::Coordinator { root, .. } => {
                std::iter::once(root).chain(root.sub_agents.iter()).collect()
            }
        }
    }
}
