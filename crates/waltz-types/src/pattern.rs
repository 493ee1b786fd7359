//! Pattern records: the opaque input unit of the waltz
//!
//! A pattern is an open-ended key-value mapping. The pipeline treats it
//! as payload except for the optional `name` field used for display and
//! identifier derivation. Fields are kept in a `BTreeMap` so that the
//! serialized form is deterministic regardless of insertion order —
//! the cache digest depends on this.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Field name used for display and core-identifier derivation.
pub const NAME_FIELD: &str = "name";

/// Display name used when a pattern carries no `name` field.
pub const UNNAMED: &str = "unknown";

/// An open-ended pattern record with deterministic field order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternRecord {
    fields: BTreeMap<String, Value>,
}

impl PatternRecord {
    /// Create an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pattern with the given display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().with_field(NAME_FIELD, name.into())
    }

    /// Add a field, consuming and returning the record (builder style).
    ///
    /// Values that fail JSON conversion are silently skipped; pattern
    /// payloads are caller-supplied JSON-compatible data by contract.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
        self
    }

    /// Insert or replace a field in place.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Look up a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The display name of this pattern, or [`UNNAMED`] if absent.
    pub fn name(&self) -> &str {
        self.fields
            .get(NAME_FIELD)
            .and_then(Value::as_str)
            .unwrap_or(UNNAMED)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Convert into a JSON value (an object with sorted keys).
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<PatternRecord> for Value {
    fn from(record: PatternRecord) -> Self {
        record.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_pattern() {
        let pattern = PatternRecord::named("genesis");
        assert_eq!(pattern.name(), "genesis");
        assert_eq!(pattern.len(), 1);
    }

    #[test]
    fn test_unnamed_pattern_falls_back() {
        let pattern = PatternRecord::new().with_field("mass", 42.0);
        assert_eq!(pattern.name(), UNNAMED);
    }

    #[test]
    fn test_builder_fields() {
        let pattern = PatternRecord::named("p")
            .with_field("stable", true)
            .with_field("operators", vec!["Burn", "Rise"]);

        assert_eq!(pattern.get("stable"), Some(&json!(true)));
        assert_eq!(pattern.get("operators"), Some(&json!(["Burn", "Rise"])));
        assert!(pattern.get("missing").is_none());
    }

    #[test]
    fn test_serialization_is_insertion_order_independent() {
        let a = PatternRecord::new()
            .with_field("alpha", 1)
            .with_field("beta", 2);
        let b = PatternRecord::new()
            .with_field("beta", 2)
            .with_field("alpha", 1);

        let a_json = serde_json::to_string(&a).unwrap();
        let b_json = serde_json::to_string(&b).unwrap();
        assert_eq!(a_json, b_json);
    }

    #[test]
    fn test_roundtrip() {
        let pattern = PatternRecord::named("x").with_field("coherence", 0.9);
        let json = serde_json::to_string(&pattern).unwrap();
        let back: PatternRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
    }
}
