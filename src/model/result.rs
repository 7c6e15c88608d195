//! Externally visible outcome of one full search plus per-attempt accounting.

use super::item::Item;
use super::query::Query;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal status of one source attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Success,
    Timeout,
    Error,
}

/// One record per source per attempt; a source demoted to the fallback
/// pass and retried there yields two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceStat {
    pub source_id: String,
    pub source_name: String,
    pub duration: Duration,
    pub result_count: usize,
    pub status: SourceStatus,
}

/// Wall-clock accounting for one scoring stage. `skipped` marks a stage
/// that failed and was passed over fail-open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageStat {
    pub stage: String,
    pub duration: Duration,
    pub skipped: bool,
}

/// Final ranked outcome of one full search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<Item>,
    pub query: Query,
    pub duration: Duration,
    pub sources: Vec<SourceStat>,
    pub stages: Vec<StageStat>,
}
