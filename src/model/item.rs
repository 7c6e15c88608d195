//! Candidate result item and its typed payload fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Identity of the source that produced an item. Stamped by the gatherer
/// from the source's static identity; downstream stages never write it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(rename = "type")]
    pub source_type: String,
    pub id: String,
    pub name: String,
}

/// Closed set of result categories. Used only for rank weighting, never
/// for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Application,
    Feature,
    File,
    Folder,
    Document,
    Image,
    Text,
    Other,
}

/// Display payload, opaque to the aggregation core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Invocable operation attached to an item, opaque to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Half-open byte range of the best title match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Well-known extension fields plus a bag for source-specific extras.
/// Scoring stages read from here but must not assume any field is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Extension {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_span: Option<MatchSpan>,
    #[serde(default)]
    pub is_fallback: bool,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, Value>,
}

/// Mutable numeric rank fields, written by scoring stages. `recency` and
/// `frequency` are caller-supplied and consumed as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoring {
    #[serde(rename = "match")]
    pub match_score: f64,
    pub recency: f64,
    pub frequency: f64,
    #[serde(rename = "final")]
    pub final_score: f64,
}

/// A single candidate result. `id` is unique within one result set, not
/// globally; everything except `scoring` is immutable once a source has
/// returned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub source: SourceRef,
    pub kind: ItemKind,
    pub render: RenderPayload,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub extension: Extension,
    #[serde(default)]
    pub scoring: Scoring,
}

impl Item {
    pub fn new(id: impl Into<String>, kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: SourceRef::default(),
            kind,
            render: RenderPayload {
                title: title.into(),
                subtitle: None,
                icon: None,
            },
            actions: Vec::new(),
            extension: Extension::default(),
            scoring: Scoring::default(),
        }
    }

    pub fn with_span(mut self, span: MatchSpan) -> Self {
        self.extension.match_span = Some(span);
        self
    }

    pub fn with_usage(mut self, recency: f64, frequency: f64) -> Self {
        self.scoring.recency = recency;
        self.scoring.frequency = frequency;
        self
    }
}
