//! Local tool implementations exposed to the catalog agents.

pub mod listing;
pub mod traffic;
pub mod translate;
pub mod weather;

use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::models::tools::ToolRegistry;
use translate::Translator;

/// Tools provided by the agent framework itself rather than this crate.
pub const EXTERNAL_TOOLS: [&str; 2] = ["google_search", "google_maps_grounding"];

/// Lookup key for a place name: lowercase with spaces removed.
pub fn normalize_place(name: &str) -> String {
    name.to_lowercase().replace(' ', "")
}

/// Read a required string argument from a tool call.
pub(crate) fn string_arg<'a>(args: &'a Value, name: &str) -> Result<&'a str, String> {
    args.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("Missing '{}' parameter", name))
}

/// Register every local tool: weather, traffic, translation and listing.
pub fn register_builtin_tools(
    registry: &mut ToolRegistry,
    config: &Config,
    translator: Arc<dyn Translator>,
) {
    weather::register(registry);
    traffic::register(registry);
    translate::register(registry, translator);
    listing::register(registry, config);
}
