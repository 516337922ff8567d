//! Traffic lookup for the weather-and-traffic agent.

use serde::Serialize;
use tracing::info;

use super::{normalize_place, string_arg};
use crate::models::tools::{Tool, ToolRegistry};

pub const TOOL_NAME: &str = "get_traffic_details";

struct Conditions {
    location: &'static str,
    status: &'static str,
    congestion: &'static str,
    average_speed: &'static str,
    incidents: u32,
    message: &'static str,
}

const CONDITIONS: &[Conditions] = &[
    Conditions {
        location: "dublin",
        status: "Heavy",
        congestion: "High",
        average_speed: "15 km/h",
        incidents: 3,
        message: "Heavy traffic on M50 motorway due to rush hour.",
    },
    Conditions {
        location: "cork",
        status: "Moderate",
        congestion: "Medium",
        average_speed: "35 km/h",
        incidents: 1,
        message: "Moderate traffic in city center.",
    },
];

/// Result of a traffic lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrafficReport {
    pub traffic_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub congestion_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_speed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incidents: Option<u32>,
    pub message: String,
}

/// Retrieves traffic information for a given location.
pub fn get_traffic_details(location: &str) -> TrafficReport {
    info!(location, "retrieving traffic information");
    let key = normalize_place(location);

    match CONDITIONS.iter().find(|c| c.location == key) {
        Some(c) => TrafficReport {
            traffic_status: c.status.to_string(),
            congestion_level: Some(c.congestion.to_string()),
            average_speed: Some(c.average_speed.to_string()),
            incidents: Some(c.incidents),
            message: c.message.to_string(),
        },
        None => TrafficReport {
            traffic_status: "Information not available".to_string(),
            congestion_level: None,
            average_speed: None,
            incidents: None,
            message: format!(
                "Traffic data for {} is not available in our database.",
                location
            ),
        },
    }
}

pub fn traffic_tool() -> Tool {
    Tool::function(TOOL_NAME, "Retrieves traffic information for a given location.").with_param(
        "location",
        "string",
        "The name of the location to retrieve traffic information for.",
        true,
    )
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register_tool(traffic_tool(), |args| {
        let location = string_arg(&args, "location")?;
        serde_json::to_value(get_traffic_details(location)).map_err(|e| e.to_string())
    });
}
