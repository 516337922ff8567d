pub mod graph;
pub mod tools;

pub use graph::{Agent, Graph};
pub use tools::{Tool, ToolCall, ToolRegistry, ToolRegistryTrait};
