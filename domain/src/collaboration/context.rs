//! Context variables - the blackboard shared by every turn of a run.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed, run-scoped state visible to every provider call.
///
/// A run starts from an empty (or caller-seeded) set, merges the metadata
/// extracted after each turn, and hands the final copy back to the caller.
/// Values are JSON so that numbers and lists (word limits, previous section
/// titles) survive the trip to the provider untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextVariables(Map<String, Value>);

impl ContextVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a value as a string slice, if it is a JSON string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Merge another set of variables into this one; incoming keys win.
    pub fn merge(&mut self, other: &ContextVariables) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Render as a JSON object (used by provider adapters)
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for ContextVariables {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ContextVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = ContextVariables::new();
        for (key, value) in iter {
            vars.insert(key, value);
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_existing_keys() {
        let mut base = ContextVariables::new()
            .with("book_title", "Old")
            .with("min_words", 500);
        let incoming = ContextVariables::new().with("book_title", "New");

        base.merge(&incoming);

        assert_eq!(base.get_str("book_title"), Some("New"));
        assert_eq!(base.get("min_words"), Some(&json!(500)));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let vars = ContextVariables::new().with("section_id", "1.2");
        assert_eq!(serde_json::to_value(&vars).unwrap(), json!({"section_id": "1.2"}));
    }

    #[test]
    fn test_from_iter() {
        let vars: ContextVariables = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(vars.len(), 2);
        assert!(vars.contains_key("b"));
    }
}
