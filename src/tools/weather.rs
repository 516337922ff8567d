//! Weather lookup for the weather agents.

use serde::Serialize;
use tracing::info;

use super::{normalize_place, string_arg};
use crate::models::tools::{Tool, ToolRegistry};

pub const TOOL_NAME: &str = "get_weather";

/// Known conditions, keyed by normalized city name.
const CONDITIONS: &[(&str, &str)] = &[("dublin", "Rainy")];

/// Result of a weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub weather: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Retrieves weather information for a given city.
///
/// Unknown cities are not an error; the report says the data is unavailable.
pub fn get_weather(city_name: &str) -> WeatherReport {
    info!(city = city_name, "retrieving weather information");
    let key = normalize_place(city_name);

    match CONDITIONS.iter().find(|(city, _)| *city == key) {
        Some((_, weather)) => WeatherReport {
            weather: weather.to_string(),
            message: None,
        },
        None => WeatherReport {
            weather: "Information not available".to_string(),
            message: Some(format!(
                "Weather data for {} is not available in our database.",
                city_name
            )),
        },
    }
}

pub fn weather_tool() -> Tool {
    Tool::function(TOOL_NAME, "Retrieves weather information for a given city.").with_param(
        "city_name",
        "string",
        "The name of the city to retrieve weather information for.",
        true,
    )
}

pub fn register(registry: &mut ToolRegistry) {
    registry.register_tool(weather_tool(), |args| {
        let city = string_arg(&args, "city_name")?;
        serde_json::to_value(get_weather(city)).map_err(|e| e.to_string())
    });
}
