//! Crate-level test suite
//!
//! This module contains tests for:
//! - Core graph functionality
//! - Built-in agent types working inside a graph
//! - The bundled workflows, end to end
//! - Properties of the analysis functions

#[cfg(test)]
mod tests {
    use crate::agents::router::RouteRule;
    use crate::agents::validator::ValidationRule;
    use crate::agents::*;
    use crate::analysis::listing::ListingSchema;
    use crate::config::Config;
    use crate::errors::{AgentDeckError, NodeError, ToolError};
    use crate::models::graph::{Agent, Graph};
    use crate::models::tools::{Tool, ToolRegistryTrait};
    use crate::tools::translate::{FallbackTranslator, Phrasebook, RemoteDisabled, Translator};
    use crate::{extract_metrics, format_listing_collection, has_quantitative_content, validate_schema};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Arc;

    // ================================
    // TEST AGENTS
    // ================================

    /// Simple test agent that echoes input
    pub struct EchoAgent {
        name: String,
    }

    impl EchoAgent {
        pub fn new(name: impl Into<String>) -> Self {
            Self { name: name.into() }
        }
    }

    #[async_trait]
    impl Agent for EchoAgent {
        async fn run(
            &mut self,
            input: &str,
            _tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
        ) -> (String, Option<i32>) {
            (format!("Echo: {}", input), None)
        }

        fn get_name(&self) -> &str {
            &self.name
        }
    }

    /// Test agent that always routes to a specific node
    pub struct FixedRouteAgent {
        name: String,
        target_node: i32,
    }

    impl FixedRouteAgent {
        pub fn new(name: impl Into<String>, target: i32) -> Self {
            Self {
                name: name.into(),
                target_node: target,
            }
        }
    }

    #[async_trait]
    impl Agent for FixedRouteAgent {
        async fn run(
            &mut self,
            input: &str,
            _tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
        ) -> (String, Option<i32>) {
            (format!("{} -> {}", self.name, input), Some(self.target_node))
        }

        fn get_name(&self) -> &str {
            &self.name
        }
    }

    /// Test agent that calls one tool with a fixed argument document
    pub struct ToolCallerAgent {
        tool: String,
        arguments: String,
    }

    #[async_trait]
    impl Agent for ToolCallerAgent {
        async fn run(
            &mut self,
            _input: &str,
            tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
        ) -> (String, Option<i32>) {
            match tool_registry.execute_tool(&self.tool, &self.arguments).await {
                Ok(value) => (value.to_string(), None),
                Err(e) => (format!("Error: {}", e), None),
            }
        }

        fn get_name(&self) -> &str {
            "ToolCaller"
        }
    }

    /// Registry with no tools at all
    pub struct EmptyRegistry;

    #[async_trait]
    impl ToolRegistryTrait for EmptyRegistry {
        fn get_tools(&self) -> Vec<Tool> {
            Vec::new()
        }

        async fn execute_tool(&self, name: &str, _arguments: &str) -> Result<Value, ToolError> {
            Err(ToolError::ToolNotFound(name.to_string()))
        }
    }

    fn offline() -> Arc<dyn Translator> {
        Arc::new(FallbackTranslator::new(Phrasebook, RemoteDisabled))
    }

    async fn run_workflow(workflow: Workflow, input: &str) -> String {
        let config = Config::default();
        let mut graph = build_graph(&workflow, &config, offline()).unwrap();
        graph.run(0, input).await
    }

    fn listing_payload() -> String {
        json!({
            "airbnbs": [
                {
                    "name": "Georgian Loft",
                    "description": "Bright loft near St Stephen's Green.",
                    "reason": "Rated 4.9 stars from 312 reviews",
                    "price": "€140 per night",
                    "location": "Dublin 2"
                },
                {
                    "name": "Harbour Cottage",
                    "description": "Seaside cottage in Howth.",
                    "reason": "Occupancy up 15% this month",
                    "price": "€95 per night",
                    "location": "Howth"
                }
            ]
        })
        .to_string()
    }

    // ================================
    // GRAPH TESTS
    // ================================

    #[tokio::test]
    async fn test_single_node_run() {
        let mut graph = Graph::new();
        graph.add_node(0, Box::new(EchoAgent::new("echo"))).unwrap();
        assert_eq!(graph.run(0, "hello").await, "Echo: hello\n");
    }

    #[tokio::test]
    async fn test_chain_passes_output_forward() {
        let mut graph = Graph::new();
        graph.add_node(0, Box::new(FixedRouteAgent::new("first", 1))).unwrap();
        graph.add_node(1, Box::new(EchoAgent::new("second"))).unwrap();
        graph.add_edge(0, 1).unwrap();

        let result = graph.run(0, "task").await;
        assert_eq!(result, "first -> task\nEcho: first -> task\n");
    }

    #[tokio::test]
    async fn test_missing_start_node() {
        let mut graph = Graph::new();
        assert_eq!(graph.run(5, "x").await, "Error: Node 5 not found\n");
    }

    #[tokio::test]
    async fn test_route_to_missing_node_stops() {
        let mut graph = Graph::new();
        graph.add_node(0, Box::new(FixedRouteAgent::new("lost", 9))).unwrap();
        assert_eq!(graph.run(0, "x").await, "lost -> x\nError: Node 9 not found\n");
    }

    #[tokio::test]
    async fn test_cycle_stops_at_hop_limit() {
        let mut graph = Graph::new().with_max_hops(3);
        graph.add_node(0, Box::new(FixedRouteAgent::new("a", 1))).unwrap();
        graph.add_node(1, Box::new(FixedRouteAgent::new("b", 0))).unwrap();

        let result = graph.run(0, "x").await;
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "Error: hop limit of 3 reached");
    }

    #[test]
    fn test_graph_construction_errors() {
        let mut graph = Graph::new();
        graph.add_node(0, Box::new(EchoAgent::new("a"))).unwrap();

        assert_eq!(
            graph.add_node(0, Box::new(EchoAgent::new("b"))),
            Err(NodeError::NodeAlreadyExists(0))
        );
        assert_eq!(graph.add_edge(0, 7), Err(NodeError::InvalidEdge { from: 0, to: 7 }));
        assert!(graph
            .register_tool_for_node(3, Tool::function("t", "t"), |_| Ok(Value::Null))
            .is_err());
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.neighbors(0), Some(&[][..]));
    }

    #[tokio::test]
    async fn test_node_tools_shadow_shared_tools() {
        let mut graph = Graph::new();
        graph.register_tool(Tool::function("whoami", "Identify"), |_| Ok(json!("shared")));
        graph
            .add_node(
                0,
                Box::new(ToolCallerAgent {
                    tool: "whoami".to_string(),
                    arguments: "{}".to_string(),
                }),
            )
            .unwrap();
        graph
            .add_node(
                1,
                Box::new(ToolCallerAgent {
                    tool: "whoami".to_string(),
                    arguments: "{}".to_string(),
                }),
            )
            .unwrap();
        graph
            .register_tool_for_node(1, Tool::function("whoami", "Identify"), |_| Ok(json!("local")))
            .unwrap();

        assert_eq!(graph.run(0, "").await, "\"shared\"\n");
        assert_eq!(graph.run(1, "").await, "\"local\"\n");
        assert!(graph.get_node_tool_registry(0).unwrap().is_empty());
    }

    // ================================
    // BUILT-IN AGENTS IN A GRAPH
    // ================================

    #[tokio::test]
    async fn test_router_delegates_to_matching_node() {
        let router = RouterAgent::new()
            .add_route(RouteRule::new(r"\bbug\b", 1))
            .unwrap()
            .add_route(RouteRule::new(r"\bhi\b", 2))
            .unwrap();
        let mut graph = Graph::new();
        graph.add_node(0, Box::new(router)).unwrap();
        graph.add_node(1, Box::new(EchoAgent::new("support"))).unwrap();
        graph.add_node(2, Box::new(EchoAgent::new("general"))).unwrap();

        assert_eq!(graph.run(0, "Found a BUG").await, "Found a BUG\nEcho: Found a BUG\n");
        assert_eq!(graph.run(0, "Hi").await, "Hi\nEcho: Hi\n");
        assert_eq!(graph.run(0, "Hello").await, "No matching route found for: Hello\n");
    }

    #[tokio::test]
    async fn test_validator_gates_listing_payloads() {
        let validator =
            ValidatorAgent::new().add_rule(ValidationRule::listing_schema(ListingSchema::default()));
        let mut graph = Graph::new();
        graph.add_node(0, Box::new(validator)).unwrap();

        let result = graph.run(0, &listing_payload()).await;
        assert_eq!(result, "Validation passed\n");

        let result = graph.run(0, r#"{"airbnbs": {}}"#).await;
        assert_eq!(
            result,
            "Validation failed\nErrors: listing_schema: schema violation: wrong type: 'airbnbs' must be a list\n"
        );
    }

    #[tokio::test]
    async fn test_tool_agent_without_tools_available() {
        let mut agent = ToolAgent::new("weather").with_tool("get_weather").with_next(1);
        let (output, next) = agent.run("Dublin", &EmptyRegistry).await;
        assert_eq!(output, "Error: Tool 'get_weather' not found");
        assert_eq!(next, None);

        let call = crate::models::tools::ToolCall::new("call_1", "get_weather", &json!({}));
        let message = EmptyRegistry.dispatch(&call).await;
        assert_eq!(message.content, "Error: Tool 'get_weather' not found");
        assert_eq!(message.tool_call_id, "call_1");
    }

    // ================================
    // BUNDLED WORKFLOWS
    // ================================

    #[tokio::test]
    async fn test_weather_workflow() {
        let config = Config::default();
        let result = run_workflow(catalog::weather_agent(&config), "What's the weather in Dublin?").await;
        assert_eq!(result, "{\"weather\":\"Rainy\"}\n");

        let result = run_workflow(catalog::weather_agent(&config), "Weather for Paris").await;
        let report: Value = serde_json::from_str(result.trim_end()).unwrap();
        assert_eq!(report["weather"], "Information not available");
        assert_eq!(
            report["message"],
            "Weather data for Paris is not available in our database."
        );
    }

    #[tokio::test]
    async fn test_weather_traffic_workflow() {
        let config = Config::default();
        let result = run_workflow(
            catalog::weather_traffic_agent(&config),
            "How are weather and traffic in Cork?",
        )
        .await;
        let lines: Vec<Value> = result
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["weather"], "Information not available");
        assert_eq!(lines[1]["traffic_status"], "Moderate");
        assert_eq!(lines[1]["incidents"], 1);
    }

    #[tokio::test]
    async fn test_coordinator_delegates_by_language() {
        let config = Config::default();

        let result = run_workflow(catalog::coordination_agent(&config), "Translate hello into Hindi").await;
        assert_eq!(
            result,
            "Translate hello into Hindi\nHindi translation: नमस्ते (namaste)\n"
        );

        let result = run_workflow(catalog::coordination_agent(&config), "Say 'thank you' in Irish").await;
        assert_eq!(
            result,
            "Say 'thank you' in Irish\nIrish translation: Go raibh maith agat\n"
        );
    }

    #[tokio::test]
    async fn test_coordinator_refuses_other_languages() {
        let config = Config::default();
        let result = run_workflow(catalog::coordination_agent(&config), "Translate hello into French").await;
        assert_eq!(result, "No matching route found for: Translate hello into French\n");
    }

    #[tokio::test]
    async fn test_coordinator_reports_translation_miss() {
        let config = Config::default();
        let result = run_workflow(catalog::coordination_agent(&config), "Translate see you soon to Irish").await;
        assert!(result.ends_with("Error translating to Irish: remote translation is disabled\n"));
    }

    #[tokio::test]
    async fn test_listing_pipeline_end_to_end() {
        let config = Config::default();
        let result = run_workflow(catalog::listing_host(&config), &listing_payload()).await;

        assert!(result.contains("Top listings in Dublin:\n\n\n1. Georgian Loft"));
        assert!(result.contains("   Price: €140 per night"));
        assert!(result.contains("2. Harbour Cottage"));
        assert!(result.ends_with("Validation passed\n"));

        let metrics_line = result
            .lines()
            .find(|line| line.starts_with("[{"))
            .unwrap();
        let metrics: Vec<Value> = serde_json::from_str(metrics_line).unwrap();
        let values: Vec<&str> = metrics.iter().filter_map(|m| m["value"].as_str()).collect();
        assert!(values.contains(&"4.9 stars"));
        assert!(values.contains(&"15%"));
        assert!(values.contains(&"€95"));
    }

    #[tokio::test]
    async fn test_listing_pipeline_rejects_bad_payload() {
        let config = Config::default();
        let payload = json!({ "airbnbs": [{ "name": "Half a listing" }] }).to_string();
        let result = run_workflow(catalog::listing_host(&config), &payload).await;
        assert_eq!(
            result,
            "Error: Tool 'parse_listing_json' execution failed: schema violation: missing field: description at index 0\n"
        );
    }

    #[tokio::test]
    async fn test_listing_pipeline_flags_empty_analysis() {
        let config = Config::default();
        let result = run_workflow(catalog::listing_host(&config), r#"{"airbnbs": []}"#).await;
        assert!(result.ends_with("Validation failed\nErrors: metrics: no metrics extracted\n"));
    }

    #[tokio::test]
    async fn test_listing_pipeline_flags_listing_without_figures() {
        let config = Config::default();
        let payload = json!({
            "airbnbs": [{
                "name": "A",
                "description": "nice",
                "reason": "cosy",
                "price": "ask host",
                "location": "somewhere"
            }]
        })
        .to_string();
        let result = run_workflow(catalog::listing_host(&config), &payload).await;
        assert!(result.contains("   Price: ask host"));
        assert!(result.ends_with("Validation failed\nErrors: metrics: no metrics extracted\n"));
    }

    #[tokio::test]
    async fn test_listing_pipeline_uses_configured_key() {
        let config = Config::from_json_str(r#"{"listing_key": "stays"}"#).unwrap();
        let mut graph = build_graph(&catalog::listing_host(&config), &config, offline()).unwrap();

        let result = graph.run(0, &listing_payload()).await;
        assert!(result.starts_with("Error: Tool 'parse_listing_json' execution failed: schema violation: missing key: stays"));

        let payload = listing_payload().replace("airbnbs", "stays");
        let result = graph.run(0, &payload).await;
        assert!(result.ends_with("Validation passed\n"));
    }

    #[test]
    fn test_every_buildable_workflow_builds() {
        let config = Config::default();
        for workflow in catalog(&config) {
            match build_graph(&workflow, &config, offline()) {
                Ok(graph) => assert!(!graph.is_empty(), "{}", workflow.name()),
                Err(AgentDeckError::Tool(ToolError::External(_))) => {
                    assert_eq!(workflow.name(), "social_event_agent")
                }
                Err(e) => panic!("{}: {}", workflow.name(), e),
            }
        }
    }

    // ================================
    // ANALYSIS PROPERTIES
    // ================================

    #[test]
    fn test_metric_values_are_substrings_at_their_span() {
        let text = "Guests gave 4.7 stars over 1,024 reviews; 92% would return, €180/night, 9 out of 10.";
        let metrics: Vec<_> = extract_metrics(text).collect();
        assert!(!metrics.is_empty());
        for metric in &metrics {
            assert_eq!(&text[metric.span.clone()], metric.value);
            assert!(metric.context.contains(&metric.value));
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Rated 4.5 stars, €99, 3/5 for location";
        let first: Vec<_> = extract_metrics(text).collect();
        let second: Vec<_> = extract_metrics(text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_formatter_emits_one_block_per_record() {
        let collection = validate_schema(&listing_payload(), "airbnbs").unwrap();
        let text = format_listing_collection(&collection);
        assert_eq!(text.matches("Recommended because:").count(), collection.len());
        assert!(text.starts_with("Top listings in Dublin:\n"));
    }

    #[test]
    fn test_schema_accepts_exactly_complete_records() {
        let complete = json!({
            "name": "a", "description": "b", "reason": "c", "price": "d", "location": "e"
        });
        for field in ["name", "description", "reason", "price", "location"] {
            let mut record = complete.clone();
            record.as_object_mut().unwrap().remove(field);
            let payload = json!({ "airbnbs": [complete.clone(), record] }).to_string();
            let err = validate_schema(&payload, "airbnbs").unwrap_err();
            assert!(err.to_string().contains(&format!("missing field: {} at index 1", field)));
        }
        let payload = json!({ "airbnbs": [complete] }).to_string();
        assert!(validate_schema(&payload, "airbnbs").is_ok());
    }

    #[test]
    fn test_quantitative_check_ignores_case() {
        assert!(has_quantitative_content("TOTAL of 12"));
        assert!(!has_quantitative_content("A quiet street with a garden"));
    }
}
