//! Validator agent for data quality checks between pipeline stages.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::listing::ListingSchema;
use crate::analysis::metrics::extract_metrics;
use crate::models::graph::Agent;
use crate::models::tools::ToolRegistryTrait;

/// Validation rule for checking inputs/outputs
#[derive(Clone)]
pub struct ValidationRule {
    /// Name of the rule
    pub name: String,
    /// Validation function
    pub validator: Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>,
}

impl ValidationRule {
    pub fn new<F>(name: impl Into<String>, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validator: Arc::new(validator),
        }
    }

    /// Input must be a listing payload that satisfies `schema`.
    pub fn listing_schema(schema: ListingSchema) -> Self {
        Self::new("listing_schema", move |input| {
            schema.validate(input).map(|_| ()).map_err(|e| e.to_string())
        })
    }

    /// Input must contain at least one rating, percentage, price or ratio.
    ///
    /// Only figures count. Words such as "price" or "reviews" on their own,
    /// e.g. in field labels, do not.
    pub fn metrics_found() -> Self {
        Self::new("metrics", |input| {
            if extract_metrics(input).next().is_some() {
                Ok(())
            } else {
                Err("no metrics extracted".to_string())
            }
        })
    }
}

/// Validator agent that checks its input against every rule.
///
/// It always ends the run; the output says whether validation passed.
///
/// # Example
/// ```rust
/// use agentdeck::agents::ValidatorAgent;
/// use agentdeck::agents::validator::ValidationRule;
///
/// let validator = ValidatorAgent::new().add_rule(ValidationRule::metrics_found());
/// assert!(validator.validate("Rated 4.8 across 312 reviews").is_ok());
/// assert!(validator.validate("Price: ask the host").is_err());
/// ```
pub struct ValidatorAgent {
    rules: Vec<ValidationRule>,
    name: String,
}

impl ValidatorAgent {
    /// Create a new validator agent
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            name: "Validator".to_string(),
        }
    }

    /// Add a validation rule
    pub fn add_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Set the agent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check input against all rules.
    ///
    /// Every failing rule is reported as `rule_name: message`.
    pub fn validate(&self, input: &str) -> Result<(), Vec<String>> {
        let errors: Vec<String> = self
            .rules
            .iter()
            .filter_map(|rule| {
                (rule.validator)(input)
                    .err()
                    .map(|msg| format!("{}: {}", rule.name, msg))
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for ValidatorAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for ValidatorAgent {
    async fn run(
        &mut self,
        input: &str,
        _tool_registry: &(dyn ToolRegistryTrait + Send + Sync),
    ) -> (String, Option<i32>) {
        match self.validate(input) {
            Ok(()) => {
                info!(validator = %self.name, "validation passed");
                ("Validation passed".to_string(), None)
            }
            Err(errors) => {
                warn!(validator = %self.name, errors = errors.len(), "validation failed");
                (format!("Validation failed\nErrors: {}", errors.join(", ")), None)
            }
        }
    }

    fn get_name(&self) -> &str {
        &self.name
    }
}
