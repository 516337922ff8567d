//! Agent configurations and the built-in agents that run them.

pub mod catalog;
pub mod definition;
pub mod router;
pub mod tool_agent;
pub mod validator;
pub mod workflow;

pub use catalog::catalog;
pub use definition::{AgentSpec, Delegation, ToolRef, Workflow};
pub use router::RouterAgent;
pub use tool_agent::ToolAgent;
pub use validator::ValidatorAgent;
pub use workflow::build_graph;
