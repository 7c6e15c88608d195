//! The owning orchestrator: registry, generation control, gather + rank.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::registry::SourceRegistry;
use crate::gather::{GatherOptions, GatherUpdate, Gatherer, OptionsError};
use crate::model::{Query, SearchResult};
use crate::rank::Sorter;
use crate::sources::Source;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid gather options: {0}")]
    Options(#[from] OptionsError),
}

/// One engine per caller; no ambient global state. Starting a new search
/// synchronously cancels the previous generation, so at most one gatherer
/// is ever live per engine.
pub struct Engine {
    registry: SourceRegistry,
    sorter: Sorter,
    options: GatherOptions,
    current: Mutex<Option<CancellationToken>>,
}

impl Engine {
    pub fn new(options: GatherOptions) -> Result<Self, EngineError> {
        Self::with_sorter(options, Sorter::default())
    }

    pub fn with_sorter(options: GatherOptions, sorter: Sorter) -> Result<Self, EngineError> {
        options.validate()?;
        Ok(Self {
            registry: SourceRegistry::new(),
            sorter,
            options,
            current: Mutex::new(None),
        })
    }

    pub fn register_source(&mut self, source: Arc<dyn Source>) {
        self.registry.register(source);
    }

    pub fn unregister_source(&mut self, id: &str) -> Option<Arc<dyn Source>> {
        self.registry.unregister(id)
    }

    /// `None` activates every registered source.
    pub fn activate_sources(&mut self, ids: Option<&[&str]>) {
        self.registry.activate(ids);
    }

    pub fn source_count(&self) -> usize {
        self.registry.len()
    }

    pub async fn search(&self, query: Query) -> SearchResult {
        self.search_with(query, |_| {}).await
    }

    /// Run one search, invoking `on_update` once per delivered batch plus
    /// once for the terminal update. Always resolves: an all-failing
    /// source set yields an empty-but-well-formed result, and a
    /// superseded call resolves early with whatever it had.
    #[instrument(skip_all, fields(query = %query.text))]
    pub async fn search_with(
        &self,
        query: Query,
        mut on_update: impl FnMut(&GatherUpdate),
    ) -> SearchResult {
        let started = Instant::now();

        let gatherer = Gatherer::new(self.registry.snapshot(), self.options.clone());
        let token = gatherer.cancel_token();
        if let Some(previous) = self.current.lock().unwrap().replace(token.clone()) {
            previous.cancel();
        }

        let (update_tx, mut update_rx) = mpsc::channel(32);
        tokio::spawn(gatherer.run(query.clone(), update_tx));

        let mut items = Vec::new();
        let mut source_stats = Vec::new();
        while let Some(update) = update_rx.recv().await {
            if token.is_cancelled() {
                break;
            }
            on_update(&update);
            let GatherUpdate {
                new_items,
                is_done,
                source_stats: stats,
                ..
            } = update;
            items.extend(new_items);
            source_stats.extend(stats);
            if is_done {
                break;
            }
        }
        // a superseded gatherer's remaining updates land nowhere
        drop(update_rx);

        let (items, stages) = self.sorter.sort(items, &query, &token);

        SearchResult {
            items,
            query,
            duration: started.elapsed(),
            sources: source_stats,
            stages,
        }
    }
}
