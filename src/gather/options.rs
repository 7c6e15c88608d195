//! Caller-supplied tuning for one gather run. Never read from disk here;
//! the embedding application owns loading and merging.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);
const FALLBACK_TIMEOUT: Duration = Duration::from_millis(5000);
const DEFAULT_WORKERS: usize = 5;
const FALLBACK_WORKERS: usize = 2;
const FORCE_PUSH_DELAY: Duration = Duration::from_millis(217);
const MAX_ITEMS_PER_SOURCE: usize = 128;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("worker pool width must be non-zero")]
    ZeroWidth,
    #[error("pass budget must be non-zero")]
    ZeroBudget,
}

/// Per-pass call budgets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PassBudgets {
    pub default: Duration,
    pub fallback: Duration,
}

/// Per-pass worker-pool widths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PassWidths {
    pub default: usize,
    pub fallback: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatherOptions {
    pub timeout: PassBudgets,
    pub concurrent: PassWidths,
    /// Debounce window coalescing rapid arrivals into one batch update.
    pub force_push_delay: Duration,
    /// Truncation guard against unbounded batches; `None` disables it.
    pub max_items_per_source: Option<usize>,
}

impl Default for GatherOptions {
    fn default() -> Self {
        Self {
            timeout: PassBudgets {
                default: DEFAULT_TIMEOUT,
                fallback: FALLBACK_TIMEOUT,
            },
            concurrent: PassWidths {
                default: DEFAULT_WORKERS,
                fallback: FALLBACK_WORKERS,
            },
            force_push_delay: FORCE_PUSH_DELAY,
            max_items_per_source: Some(MAX_ITEMS_PER_SOURCE),
        }
    }
}

impl GatherOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.concurrent.default == 0 || self.concurrent.fallback == 0 {
            return Err(OptionsError::ZeroWidth);
        }
        if self.timeout.default.is_zero() || self.timeout.fallback.is_zero() {
            return Err(OptionsError::ZeroBudget);
        }
        Ok(())
    }
}
