//! One pure ranking function in the sorter's pipeline.

use crate::model::{Item, Query};
use tokio_util::sync::CancellationToken;

pub trait ScoringStage: Send + Sync {
    /// Stable stage label used in per-stage stats.
    fn name(&self) -> &'static str;

    /// Transform `items` in place for `query`. Stages are synchronous and
    /// CPU-bound; long-running ones should check `cancel` themselves. An
    /// error is absorbed by the sorter: the stage is skipped and the list
    /// flows on to the next stage (partial writes are tolerated).
    fn apply(
        &self,
        items: &mut Vec<Item>,
        query: &Query,
        cancel: &CancellationToken,
    ) -> anyhow::Result<()>;
}
