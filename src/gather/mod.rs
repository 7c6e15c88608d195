//! Concurrent fan-out over the active source set.

pub mod gatherer;
pub mod options;


pub use gatherer::Gatherer;
pub use options::{GatherOptions, OptionsError, PassBudgets, PassWidths};

use crate::model::{Item, SourceStat};
use serde::{Deserialize, Serialize};

/// Streaming message delivered zero or more times before a final
/// `is_done = true` message. `new_items` and `source_stats` are deltas
/// since the previous update; `total_count` is cumulative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatherUpdate {
    pub new_items: Vec<Item>,
    pub total_count: usize,
    pub is_done: bool,
    pub source_stats: Vec<SourceStat>,
}
