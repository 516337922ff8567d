//! Error handling module for the agentdeck library.
//!
//! Provides the error types raised by listing validation, tool dispatch,
//! graph construction, translation and configuration loading.

use thiserror::Error;

/// Main error type for the agentdeck library
#[derive(Debug, Error)]
pub enum AgentDeckError {
    /// Listing payload errors
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),
    /// Tool execution errors
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
    /// Graph node errors
    #[error("Node error: {0}")]
    Node(#[from] NodeError),
    /// Translation errors
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Routing or extraction pattern that does not compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),
    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised while validating a listing payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// The payload is not syntactically valid JSON.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// The payload parses but does not have the required shape.
    #[error("schema violation: {0}")]
    SchemaViolation(#[from] SchemaViolation),
}

/// The first structural mismatch found in a listing payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    #[error("missing key: {key}")]
    MissingKey { key: String },
    #[error("wrong type: '{key}' must be a list")]
    WrongType { key: String },
    #[error("missing field: {field} at index {index}")]
    MissingField { field: String, index: usize },
}

/// Errors related to tool operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    ToolNotFound(String),
    #[error("Tool '{name}' execution failed: {error}")]
    ToolExecutionFailed { name: String, error: String },
    #[error("Invalid arguments for tool '{name}': {error}")]
    InvalidArguments { name: String, error: String },
    #[error("Tool '{0}' is provided by the agent framework")]
    External(String),
}

/// Errors related to graph node operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("Node {0} not found")]
    NodeNotFound(i32),
    #[error("Node {0} already exists")]
    NodeAlreadyExists(i32),
    #[error("Invalid edge from {from} to {to}")]
    InvalidEdge { from: i32, to: i32 },
}

/// Errors raised by translators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("no local translation for '{0}'")]
    NotInPhrasebook(String),
    #[error("remote translation is disabled")]
    RemoteDisabled,
    #[error("remote translation failed: {0}")]
    Remote(String),
    #[error("remote translation timed out after {0} ms")]
    Timeout(u64),
}

/// Errors raised while loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid config document: {0}")]
    Parse(String),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Result type alias for agentdeck operations
pub type AgentDeckResult<T> = Result<T, AgentDeckError>;

impl From<serde_json::Error> for AgentDeckError {
    fn from(error: serde_json::Error) -> Self {
        AgentDeckError::Serialization(error.to_string())
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        TranslationError::Remote(error.to_string())
    }
}
