//! In-memory reference source over a preloaded item list.

use super::Source;
use crate::model::{Item, MatchSpan, Query};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// The reference implementation of the source contract, and the test/demo
/// source. Matches the query case-insensitively against item titles and
/// fills `extension.match_span` with the first hit. Real providers (app
/// index, file index, clipboard history) live outside this crate and own
/// their own state.
pub struct FixedSource {
    id: String,
    name: String,
    items: Vec<Item>,
}

impl FixedSource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items,
        }
    }
}

#[async_trait]
impl Source for FixedSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> &str {
        "fixed"
    }

    async fn search(&self, query: &Query, _cancel: CancellationToken) -> anyhow::Result<Vec<Item>> {
        let needle = query.text.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(self.items.clone());
        }

        let mut hits = Vec::new();
        for item in &self.items {
            let title = item.render.title.to_lowercase();
            if let Some(start) = title.find(&needle) {
                let mut hit = item.clone();
                hit.extension.match_span = Some(MatchSpan {
                    start,
                    end: start + needle.len(),
                });
                hits.push(hit);
            }
        }
        Ok(hits)
    }
}
