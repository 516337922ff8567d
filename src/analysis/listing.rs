//! Listing payload validation.
//!
//! A listing payload is a JSON object holding an array of records under a
//! collection key. Validation is all-or-nothing and stops at the first
//! violation; an accepted payload is kept exactly as parsed.

use serde_json::{Map, Value};
use std::borrow::Cow;
use tracing::debug;

use crate::errors::{ListingError, SchemaViolation};

/// Collection key used when none is configured.
pub const DEFAULT_LISTING_KEY: &str = "airbnbs";

/// Fields every listing record must carry, in checking order.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "description", "reason", "price", "location"];

/// Shape a listing payload is checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSchema {
    key: String,
    required: Vec<String>,
}

impl ListingSchema {
    /// Schema with the standard required fields under `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: REQUIRED_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Replace the required field list.
    pub fn with_required_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn required_fields(&self) -> &[String] {
        &self.required
    }

    /// Parse `payload` and check it against this schema.
    pub fn validate(&self, payload: &str) -> Result<ListingCollection, ListingError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| ListingError::MalformedPayload(e.to_string()))?;
        self.validate_value(value)
    }

    /// Check an already-parsed payload against this schema.
    pub fn validate_value(&self, value: Value) -> Result<ListingCollection, ListingError> {
        let records = value
            .as_object()
            .and_then(|object| object.get(&self.key))
            .ok_or_else(|| SchemaViolation::MissingKey { key: self.key.clone() })?;

        let records = records
            .as_array()
            .ok_or_else(|| SchemaViolation::WrongType { key: self.key.clone() })?;

        for (index, record) in records.iter().enumerate() {
            let object = record.as_object();
            for field in &self.required {
                if !object.is_some_and(|o| o.contains_key(field)) {
                    debug!(key = %self.key, index, field = %field, "listing record rejected");
                    return Err(SchemaViolation::MissingField {
                        field: field.clone(),
                        index,
                    }
                    .into());
                }
            }
        }

        debug!(key = %self.key, records = records.len(), "listing payload accepted");
        Ok(ListingCollection {
            key: self.key.clone(),
            payload: value,
        })
    }
}

impl Default for ListingSchema {
    fn default() -> Self {
        Self::new(DEFAULT_LISTING_KEY)
    }
}

/// Parse and validate a listing payload whose records live under `key`.
///
/// # Example
/// ```rust
/// use agentdeck::analysis::listing::validate_schema;
///
/// let collection = validate_schema(r#"{"airbnbs": []}"#, "airbnbs").unwrap();
/// assert!(collection.is_empty());
/// assert!(validate_schema("not json", "airbnbs").is_err());
/// ```
pub fn validate_schema(payload: &str, key: &str) -> Result<ListingCollection, ListingError> {
    ListingSchema::new(key).validate(payload)
}

/// A listing payload together with the key naming its record array.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingCollection {
    key: String,
    payload: Value,
}

impl ListingCollection {
    /// Wrap a payload without validating it.
    ///
    /// Records may then lack fields or the key may be absent; readers treat
    /// such gaps as empty rather than failing.
    pub fn unchecked(key: impl Into<String>, payload: Value) -> Self {
        Self {
            key: key.into(),
            payload,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The payload exactly as it was parsed.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }

    /// Records in document order.
    pub fn records(&self) -> impl Iterator<Item = ListingRecord<'_>> {
        self.payload
            .get(&self.key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .map(|value| ListingRecord {
                fields: value.as_object(),
            })
    }

    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view of one record in a [`ListingCollection`].
#[derive(Debug, Clone, Copy)]
pub struct ListingRecord<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> ListingRecord<'a> {
    /// Field text, with non-string values rendered as JSON.
    pub fn field(&self, name: &str) -> Option<Cow<'a, str>> {
        match self.fields?.get(name)? {
            Value::String(text) => Some(Cow::Borrowed(text.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn name(&self) -> Option<Cow<'a, str>> {
        self.field("name")
    }

    pub fn description(&self) -> Option<Cow<'a, str>> {
        self.field("description")
    }

    pub fn reason(&self) -> Option<Cow<'a, str>> {
        self.field("reason")
    }

    pub fn price(&self) -> Option<Cow<'a, str>> {
        self.field("price")
    }

    pub fn location(&self) -> Option<Cow<'a, str>> {
        self.field("location")
    }
}
