//! agentdeck - agent configurations and the tools behind them
//!
//! This library bundles a small catalog of conversational agents (weather,
//! traffic, social events, translation and short-term rental research) with
//! the local tools they call, plus the text analysis those tools rely on:
//! listing payload validation, listing summaries, metric extraction and a
//! quantitative content check.
//!
//! Agents are wired into a [`Graph`] where each agent's output becomes the
//! next agent's input.

pub mod agents;
pub mod analysis;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod tools;

// Re-export commonly used types for convenience
pub use analysis::{
    extract_metrics, format_listing_collection, has_quantitative_content, validate_schema,
};
pub use config::Config;
pub use errors::{AgentDeckError, AgentDeckResult};
pub use models::graph::{Agent, Graph};
pub use models::tools::{Tool, ToolRegistry, ToolRegistryTrait};

#[cfg(test)]
mod tests;
