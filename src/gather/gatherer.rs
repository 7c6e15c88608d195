//! Two-pass bounded fan-out with timeout demotion and debounced delivery.
//! Sources start in the default queue; one that exceeds its budget moves
//! to a second fallback pass with a longer budget and a narrower pool.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::{GatherOptions, GatherUpdate};
use crate::model::{Item, Query, SourceRef, SourceStat, SourceStatus};
use crate::sources::Source;

/// Outcome of one source attempt, reported by a worker to the collector.
enum Outcome {
    Success {
        source: Arc<dyn Source>,
        items: Vec<Item>,
        duration: Duration,
    },
    Timeout {
        source: Arc<dyn Source>,
        duration: Duration,
    },
    Failure {
        source: Arc<dyn Source>,
        error: anyhow::Error,
        duration: Duration,
    },
}

/// Fan-out engine for one search generation. Created with its own
/// cancellation token; once superseded it is abandoned, never reused.
pub struct Gatherer {
    sources: Vec<Arc<dyn Source>>,
    options: GatherOptions,
    cancel: CancellationToken,
    generation: Uuid,
}

impl Gatherer {
    pub fn new(sources: Vec<Arc<dyn Source>>, options: GatherOptions) -> Self {
        Self {
            sources,
            options,
            cancel: CancellationToken::new(),
            generation: Uuid::new_v4(),
        }
    }

    /// Token governing every worker of this generation.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abandon all outstanding work for this generation.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Fan out over the source set, streaming batched updates into
    /// `updates`. Emits exactly one terminal `is_done = true` update, then
    /// resolves with the total number of gathered items. Updates sent
    /// after the receiver is dropped vanish silently.
    #[instrument(skip_all, fields(generation = %self.generation, query = %query.text))]
    pub async fn run(self, query: Query, updates: mpsc::Sender<GatherUpdate>) -> usize {
        let query = Arc::new(query);
        let mut collector = Collector::new(self.options.force_push_delay, updates);

        // the first update must land within the default budget even if
        // no source has answered yet
        collector.deadline = Some(Instant::now() + self.options.timeout.default);

        let demoted = self
            .pass(
                Arc::clone(&query),
                self.sources.clone(),
                self.options.timeout.default,
                self.options.concurrent.default,
                false,
                &mut collector,
            )
            .await;

        if !demoted.is_empty() && !self.cancel.is_cancelled() {
            debug!(demoted = demoted.len(), "running fallback pass");
            self.pass(
                query,
                demoted,
                self.options.timeout.fallback,
                self.options.concurrent.fallback,
                true,
                &mut collector,
            )
            .await;
        }

        collector.finish().await
    }

    /// Run one queue of sources through a bounded worker pool, folding
    /// outcomes into the collector as they complete. Returns the sources
    /// that timed out, in completion order.
    async fn pass(
        &self,
        query: Arc<Query>,
        sources: Vec<Arc<dyn Source>>,
        budget: Duration,
        width: usize,
        fallback: bool,
        collector: &mut Collector,
    ) -> Vec<Arc<dyn Source>> {
        let mut demoted = Vec::new();
        if sources.is_empty() {
            return demoted;
        }

        let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(width.max(1));
        let producer = {
            let cancel = self.cancel.clone();
            let cap = self.options.max_items_per_source;
            tokio::spawn(async move {
                stream::iter(sources)
                    .for_each_concurrent(width.max(1), |source| {
                        let outcome_tx = outcome_tx.clone();
                        let cancel = cancel.clone();
                        let query = Arc::clone(&query);
                        async move {
                            // a worker that observes cancellation before
                            // starting records nothing
                            if cancel.is_cancelled() {
                                return;
                            }
                            let outcome =
                                call_source(source, &query, cancel, budget, cap, fallback).await;
                            let _ = outcome_tx.send(outcome).await;
                        }
                    })
                    .await;
            })
        };

        loop {
            let deadline = collector.deadline;
            let sleep_target =
                deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(60));
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {
                    break;
                }
                outcome = outcome_rx.recv() => {
                    match outcome {
                        Some(outcome) => {
                            if let Some(source) = collector.absorb(outcome) {
                                demoted.push(source);
                            }
                        }
                        None => break,
                    }
                }
                _ = time::sleep_until(sleep_target), if deadline.is_some() => {
                    collector.flush(false).await;
                }
            }
        }

        // in-flight work of a superseded generation is garbage
        producer.abort();
        demoted
    }
}

/// Call one source under its pass budget and classify the result.
async fn call_source(
    source: Arc<dyn Source>,
    query: &Query,
    cancel: CancellationToken,
    budget: Duration,
    cap: Option<usize>,
    fallback: bool,
) -> Outcome {
    let started = Instant::now();
    match time::timeout(budget, source.search(query, cancel)).await {
        Ok(Ok(batch)) => {
            let items = sanitize(batch, source.as_ref(), cap, fallback);
            Outcome::Success {
                source,
                items,
                duration: started.elapsed(),
            }
        }
        Ok(Err(error)) => Outcome::Failure {
            source,
            error,
            duration: started.elapsed(),
        },
        Err(_) => Outcome::Timeout {
            source,
            duration: started.elapsed(),
        },
    }
}

/// Repair a batch instead of failing it: items with empty or duplicate
/// ids are dropped, oversized batches truncated, every survivor stamped
/// with the producing source's identity.
fn sanitize(batch: Vec<Item>, source: &dyn Source, cap: Option<usize>, fallback: bool) -> Vec<Item> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(batch.len());
    for mut item in batch {
        if item.id.is_empty() {
            warn!(source = source.id(), "dropping item with empty id");
            continue;
        }
        if !seen.insert(item.id.clone()) {
            warn!(source = source.id(), item = %item.id, "dropping duplicate item id");
            continue;
        }
        item.source = SourceRef {
            source_type: source.source_type().to_string(),
            id: source.id().to_string(),
            name: source.name().to_string(),
        };
        if fallback {
            item.extension.is_fallback = true;
        }
        items.push(item);
    }
    if let Some(cap) = cap {
        if items.len() > cap {
            warn!(
                source = source.id(),
                kept = cap,
                dropped = items.len() - cap,
                "truncating oversized batch"
            );
            items.truncate(cap);
        }
    }
    items
}

/// Owns all mutable gather state: the accumulator, the push buffer, and
/// the flush deadline. Lives on the collector loop only, so no locks.
struct Collector {
    updates: mpsc::Sender<GatherUpdate>,
    push_delay: Duration,
    buffer: Vec<Item>,
    stats: Vec<SourceStat>,
    total: usize,
    first_flushed: bool,
    deadline: Option<Instant>,
}

impl Collector {
    fn new(push_delay: Duration, updates: mpsc::Sender<GatherUpdate>) -> Self {
        Self {
            updates,
            push_delay,
            buffer: Vec::new(),
            stats: Vec::new(),
            total: 0,
            first_flushed: false,
            deadline: None,
        }
    }

    /// Fold one worker outcome into the gather state. Returns the source
    /// when it timed out, so the caller can requeue it.
    fn absorb(&mut self, outcome: Outcome) -> Option<Arc<dyn Source>> {
        match outcome {
            Outcome::Success {
                source,
                items,
                duration,
            } => {
                self.stats.push(stat_for(
                    source.as_ref(),
                    duration,
                    items.len(),
                    SourceStatus::Success,
                ));
                self.total += items.len();
                self.buffer.extend(items);
                if !self.first_flushed {
                    // flush on the next tick so a same-burst of fast
                    // sources coalesces into the first batch
                    self.deadline = Some(Instant::now());
                } else {
                    self.deadline = Some(Instant::now() + self.push_delay);
                }
                None
            }
            Outcome::Timeout { source, duration } => {
                debug!(source = source.id(), "source exceeded its pass budget");
                self.stats
                    .push(stat_for(source.as_ref(), duration, 0, SourceStatus::Timeout));
                Some(source)
            }
            Outcome::Failure {
                source,
                error,
                duration,
            } => {
                warn!(source = source.id(), error = %error, "source failed");
                self.stats
                    .push(stat_for(source.as_ref(), duration, 0, SourceStatus::Error));
                None
            }
        }
    }

    /// Emit buffered items and pending stats as one update.
    async fn flush(&mut self, is_done: bool) {
        self.deadline = None;
        self.first_flushed = true;
        let update = GatherUpdate {
            new_items: std::mem::take(&mut self.buffer),
            total_count: self.total,
            is_done,
            source_stats: std::mem::take(&mut self.stats),
        };
        let _ = self.updates.send(update).await;
    }

    /// Flush the remainder as the single terminal update.
    async fn finish(mut self) -> usize {
        self.flush(true).await;
        self.total
    }
}

fn stat_for(
    source: &dyn Source,
    duration: Duration,
    result_count: usize,
    status: SourceStatus,
) -> SourceStat {
    SourceStat {
        source_id: source.id().to_string(),
        source_name: source.name().to_string(),
        duration,
        result_count,
        status,
    }
}
