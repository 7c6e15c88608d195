//! Source contract: one registered provider of candidates per result category.

pub mod fixed;

#[cfg(test)]
mod tests;

pub use fixed::FixedSource;

use crate::model::{Item, Query};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A unit the engine fans out to. Failure-isolated from every other
/// source: an error here is recorded and never fails the overall search.
#[async_trait]
pub trait Source: Send + Sync {
    /// Stable identifier, unique within one engine.
    fn id(&self) -> &str;

    /// Human-readable name used in stats and logging.
    fn name(&self) -> &str;

    /// Provider category (e.g. "application", "plugin").
    fn source_type(&self) -> &str;

    /// Produce one bounded batch of candidates for `query`.
    ///
    /// The whole batch is returned at once; there is no incremental
    /// delivery. Implementations should observe `cancel` at their own
    /// suspension points; the engine additionally wraps the call in a
    /// per-pass budget, so a call that ignores the token may keep running
    /// internally but its eventual result has nowhere to land.
    async fn search(&self, query: &Query, cancel: CancellationToken) -> anyhow::Result<Vec<Item>>;

    /// Optional lifecycle hook, invoked by the embedding application when
    /// the source is brought up. Not called during a search.
    async fn load(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Optional lifecycle hook, invoked by the embedding application when
    /// the user confirms an item from this source.
    async fn execute(&self, item: &Item) -> anyhow::Result<()> {
        let _ = item;
        Ok(())
    }

    /// Optional lifecycle hook, invoked by the embedding application when
    /// the source is taken down.
    async fn deactivate(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
