//! Listing tools for the sequential listing pipeline.

use serde_json::{json, Value};

use super::string_arg;
use crate::analysis::format::format_listing_collection;
use crate::analysis::listing::{ListingCollection, ListingSchema};
use crate::analysis::metrics::extract_metrics;
use crate::analysis::quantitative::has_quantitative_content;
use crate::config::Config;
use crate::models::tools::{Tool, ToolRegistry};

pub const PARSE_TOOL_NAME: &str = "parse_listing_json";
pub const FORMAT_TOOL_NAME: &str = "format_listings";
pub const VALIDATE_ANALYSIS_TOOL_NAME: &str = "validate_listing_analysis";
pub const EXTRACT_METRICS_TOOL_NAME: &str = "extract_metrics";

pub fn parse_tool() -> Tool {
    Tool::function(PARSE_TOOL_NAME, "Parse and validate a listing JSON response.").with_param(
        "json_string",
        "string",
        "JSON string containing listing data",
        true,
    )
}

pub fn format_tool() -> Tool {
    Tool::function(FORMAT_TOOL_NAME, "Format listing data into a readable summary.").with_param(
        "listings",
        "object",
        "Object holding the listing records",
        true,
    )
}

pub fn validate_analysis_tool() -> Tool {
    Tool::function(
        VALIDATE_ANALYSIS_TOOL_NAME,
        "Check that a listing analysis contains quantitative data.",
    )
    .with_param("analysis", "string", "Analysis text to validate", true)
}

pub fn extract_metrics_tool() -> Tool {
    Tool::function(
        EXTRACT_METRICS_TOOL_NAME,
        "Extract numerical metrics from analysis text.",
    )
    .with_param("text", "string", "Text containing metrics", true)
}

/// Register the four listing tools, using the configured collection key and
/// context window.
pub fn register(registry: &mut ToolRegistry, config: &Config) {
    let schema = ListingSchema::new(config.listing_key.clone());
    registry.register_tool(parse_tool(), move |args| {
        let payload = string_arg(&args, "json_string")?;
        schema
            .validate(payload)
            .map(ListingCollection::into_payload)
            .map_err(|e| e.to_string())
    });

    let key = config.listing_key.clone();
    registry.register_tool(format_tool(), move |args| {
        let listings = args
            .get("listings")
            .cloned()
            .ok_or_else(|| "Missing 'listings' parameter".to_string())?;
        let collection = ListingCollection::unchecked(key.clone(), listings);
        Ok(Value::String(format_listing_collection(&collection)))
    });

    registry.register_tool(validate_analysis_tool(), |args| {
        let analysis = string_arg(&args, "analysis")?;
        Ok(json!(has_quantitative_content(analysis)))
    });

    let window = config.context_window;
    registry.register_tool(extract_metrics_tool(), move |args| {
        let text = string_arg(&args, "text")?;
        let metrics: Vec<_> = extract_metrics(text).with_context_window(window).collect();
        serde_json::to_value(metrics).map_err(|e| e.to_string())
    });
}
