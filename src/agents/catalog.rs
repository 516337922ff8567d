//! The five bundled agent configurations.

use crate::agents::definition::{AgentSpec, Delegation, ToolRef, Workflow};
use crate::config::Config;
use crate::tools::{listing, traffic, translate, weather};

/// Model used by the social events agent.
pub const EXPERIMENTAL_MODEL: &str = "gemini-2.0-flash-exp";
/// Model used by the listing research pipeline.
pub const RESEARCH_MODEL: &str = "gemini-2.5-pro";

const NO_RESULT_GUIDANCE: &str = "If the tool returns an error or no information is found, \
inform the user politely that you could not find any information or that there might be an issue.";

pub fn weather_agent(config: &Config) -> Workflow {
    Workflow::Single {
        agent: AgentSpec::new("weather_agent", &config.default_model)
            .with_description("Provides weather information for specific cities.")
            .with_instruction(format!(
                "You are an expert Weather Assistant.\n\
                 When the user requests weather information for a specific city, \
                 you must use the '{}' tool to find relevant information.\n\
                 {}\n\
                 If the tool is successful and returns data, present the weather information clearly.",
                weather::TOOL_NAME,
                NO_RESULT_GUIDANCE
            ))
            .with_tool(ToolRef::local(weather::TOOL_NAME)),
    }
}

pub fn weather_traffic_agent(config: &Config) -> Workflow {
    Workflow::Single {
        agent: AgentSpec::new("weather_traffic_agent", &config.default_model)
            .with_description("Provides weather and traffic information for specific cities.")
            .with_instruction(format!(
                "You are an expert Weather and Traffic Assistant.\n\
                 When the user requests weather information and traffic details for a specific city, \
                 you must use the '{}' and '{}' tools to find relevant information.\n\
                 {}\n\
                 If the tools are successful and return data, present the weather and traffic information clearly.",
                weather::TOOL_NAME,
                traffic::TOOL_NAME,
                NO_RESULT_GUIDANCE
            ))
            .with_tool(ToolRef::local(weather::TOOL_NAME))
            .with_tool(ToolRef::local(traffic::TOOL_NAME)),
    }
}

pub fn social_event_agent(_config: &Config) -> Workflow {
    Workflow::Single {
        agent: AgentSpec::new("social_event_agent", EXPERIMENTAL_MODEL)
            .with_description(
                "Provides information about social events for specific cities and optimized travel routes.",
            )
            .with_instruction(
                "You are an expert Social Events Suggestion Assistant with Travel Planning.\n\
                 When the user requests event suggestions for a specific city and date range, use the \
                 'google_search' tool to find relevant social events and present each event's name, date, \
                 location and a brief description if available.\n\
                 When the user requests travel routes or directions to events, use the \
                 'google_maps_grounding' tool. Include travel time and distance, the recommended \
                 transportation mode, step-by-step directions if available, and alternative routes if applicable.\n\
                 If the user provides a starting location, use it for route optimization; otherwise ask for one. \
                 Consider traffic conditions and suggest the fastest route. For several events, you may \
                 suggest an optimized multi-stop itinerary.\n\
                 If any tool returns an error or no results are found, inform the user politely and suggest alternatives.",
            )
            .with_tool(ToolRef::external("google_search"))
            .with_tool(ToolRef::external("google_maps_grounding")),
    }
}

/// Coordinator that delegates Hindi requests to `language_agent_1` and Irish
/// requests to `language_agent_2`.
pub fn coordination_agent(config: &Config) -> Workflow {
    let hindi = AgentSpec::new("language_agent_1", &config.default_model)
        .with_description(format!(
            "Handles simple language conversion to Hindi using the '{}' tool.",
            translate::HINDI_TOOL_NAME
        ))
        .with_instruction("You are the Language Agent. Your ONLY task is to translate the user's query to Hindi.")
        .with_tool(ToolRef::local(translate::HINDI_TOOL_NAME));

    let irish = AgentSpec::new("language_agent_2", &config.default_model)
        .with_description(format!(
            "Handles simple language conversion to Irish using the '{}' tool.",
            translate::IRISH_TOOL_NAME
        ))
        .with_instruction("You are the Language Agent. Your ONLY task is to translate the user's query to Irish.")
        .with_tool(ToolRef::local(translate::IRISH_TOOL_NAME));

    let root = AgentSpec::new("coordination_agent", &config.default_model)
        .with_description("Coordinates a team of translation agents.")
        .with_instruction(
            "You are the main Language Agent coordinating a team. You have specialized sub-agents: \
             1. 'language_agent_1': Handles simple language conversion to Hindi. \
             2. 'language_agent_2': Handles simple language conversion to Irish. \
             Analyze the user's query. If it asks for Hindi, delegate to 'language_agent_1'. \
             If it asks for Irish, delegate to 'language_agent_2'. \
             For anything else, respond appropriately or state you cannot handle it.",
        )
        .with_sub_agent(hindi)
        .with_sub_agent(irish);

    Workflow::Coordinator {
        root,
        delegations: vec![
            Delegation {
                pattern: r"\bhindi\b".to_string(),
                agent: "language_agent_1".to_string(),
            },
            Delegation {
                pattern: r"\b(irish|gaeilge)\b".to_string(),
                agent: "language_agent_2".to_string(),
            },
        ],
    }
}

/// Two-stage listing research: find listings, then analyze them.
pub fn listing_host(config: &Config) -> Workflow {
    let key = &config.listing_key;

    let finder = AgentSpec::new("top_bnb_agent", RESEARCH_MODEL)
        .with_instruction(format!(
            "You are a short-term rental trends analyst.\n\
             Your job is to search the web for currently listed rentals in Dublin.\n\
             1. Search for well-known rentals in Dublin.\n\
             2. Extract the top 3.\n\
             3. Return them as JSON.\n\
             Focus on listings trending in the last 2 weeks.\n\
             You MUST return only a JSON object of the form \
             {{\"{key}\": [{{\"name\": \"listing name\", \"description\": \"1-2 sentences\", \
             \"reason\": \"why it is trending\", \"price\": \"price per night\", \"location\": \"location\"}}]}} \
             with no additional text."
        ))
        .with_tool(ToolRef::external("google_search"))
        .with_tool(ToolRef::local(listing::PARSE_TOOL_NAME));

    let analyzer = AgentSpec::new("trend_analyzer_agent", RESEARCH_MODEL)
        .with_instruction(
            "You are a data analyst specializing in trending rentals. \
             Perform deep research to find quantitative data and insights.\n\
             For each listing, search for statistics, numbers and metrics: reviews, ratings, location and price. \
             Provide concrete numbers and data points. Keep it concise.\n\
             Always prioritize quantitative information over qualitative descriptions.",
        )
        .with_tool(ToolRef::external("google_search"))
        .with_tool(ToolRef::local(listing::FORMAT_TOOL_NAME))
        .with_tool(ToolRef::local(listing::EXTRACT_METRICS_TOOL_NAME));

    Workflow::Sequential {
        name: "airbnb_host".to_string(),
        stages: vec![finder, analyzer],
    }
}

/// All bundled configurations, in presentation order.
pub fn catalog(config: &Config) -> Vec<Workflow> {
    vec![
        weather_agent(config),
        weather_traffic_agent(config),
        social_event_agent(config),
        coordination_agent(config),
        listing_host(config),
    ]
}

pub fn find_workflow(config: &Config, name: &str) -> Option<Workflow> {
    catalog(config).into_iter().find(|w| w.name() == name)
}
