/// Server-side validation errors keyed by field path
///
/// Paths follow the server's dotted convention, e.g. `title` or
/// `sub_albums.0.images.2.real_image_id`. Only the first message per path
/// is kept, which is what the form displays.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(path.into(), message.into());
    }

    /// Message for one field path, if the server flagged it
    pub fn get(&self, path: &str) -> Option<&str> {
        self.messages.get(path).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a validation response body
    ///
    /// Accepts `{"errors": {path: [msg, ...]}}` as well as plain string
    /// messages per path. Anything else yields an empty set.
    pub fn from_validation_body(body: &str) -> Self {
        #[derive(Deserialize)]
        struct ValidationBody {
            #[serde(default)]
            errors: BTreeMap<String, Value>,
        }

        let Ok(parsed) = serde_json::from_str::<ValidationBody>(body) else {
            return Self::default();
        };

        let mut errors = Self::default();
        for (path, value) in parsed.errors {
            let message = match value {
                Value::String(message) => Some(message),
                Value::Array(messages) => messages
                    .into_iter()
                    .find_map(|m| m.as_str().map(str::to_owned)),
                _ => None,
            };
            if let Some(message) = message {
                errors.insert(path, message);
            }
        }
        errors
    }

    /// Top-level `message` of a validation body, if there is one
    pub fn validation_message(body: &str) -> Option<String> {
        let parsed: Value = serde_json::from_str(body).ok()?;
        parsed
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = Self::default();
        for (path, message) in iter {
            errors.insert(path, message);
        }
        errors
    }
}
