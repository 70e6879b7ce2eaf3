//! Login and registration input

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// User-supplied fields forwarded verbatim as a JSON request body
///
/// The store never inspects these; whatever the form collected (username,
/// email, password, role...) is what the backend receives.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Map<String, Value>);

impl Credentials {
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

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Credentials {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// Secrets must not leak through `{:?}` in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in &self.0 {
            if key.to_ascii_lowercase().contains("password") {
                map.entry(key, &"<redacted>");
            } else {
                map.entry(key, value);
            }
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_plain_object() {
        let credentials = Credentials::new()
            .with("username", "a")
            .with("password", "b")
            .with("remember", true);
        assert_eq!(
            serde_json::to_value(&credentials).unwrap(),
            json!({"username": "a", "password": "b", "remember": true})
        );
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let credentials: Credentials = [("email", "a@b.c"), ("confirmPassword", "hunter2")]
            .into_iter()
            .collect();
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("a@b.c"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
