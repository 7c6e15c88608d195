//! Immutable search query wrapper.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Identifies one search request. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, Value>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: HashMap::new(),
        }
    }

    pub fn with_context(text: impl Into<String>, context: HashMap<String, Value>) -> Self {
        Self {
            text: text.into(),
            context,
        }
    }
}
