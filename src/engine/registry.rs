//! Insert-ordered source registry with an optional activation subset.

use crate::sources::Source;
use std::collections::HashSet;
use std::sync::Arc;

/// The only state shared across the engine/gatherer boundary, and only
/// via immutable snapshots: in-flight gatherers keep the set they were
/// created with while the registry mutates freely.
#[derive(Default)]
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
    active: Option<HashSet<String>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source, replacing any existing one with the same id.
    pub fn register(&mut self, source: Arc<dyn Source>) {
        if let Some(existing) = self.sources.iter_mut().find(|s| s.id() == source.id()) {
            *existing = source;
        } else {
            self.sources.push(source);
        }
    }

    pub fn unregister(&mut self, id: &str) -> Option<Arc<dyn Source>> {
        let pos = self.sources.iter().position(|s| s.id() == id)?;
        Some(self.sources.remove(pos))
    }

    /// Restrict participation to `ids`; `None` means every registered
    /// source participates.
    pub fn activate(&mut self, ids: Option<&[&str]>) {
        self.active = ids.map(|ids| ids.iter().map(|id| (*id).to_string()).collect());
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The participating set, captured once per gatherer generation.
    pub fn snapshot(&self) -> Vec<Arc<dyn Source>> {
        match &self.active {
            None => self.sources.clone(),
            Some(ids) => self
                .sources
                .iter()
                .filter(|s| ids.contains(s.id()))
                .cloned()
                .collect(),
        }
    }
}
