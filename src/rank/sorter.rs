//! Ordered scoring pipeline with per-stage accounting.

use super::score::ScoreStage;
use super::stage::ScoringStage;
use crate::model::{Item, Query, StageStat};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Holds an ordered list of scoring stages and applies them strictly in
/// registration order, output of stage *n* feeding stage *n+1*.
pub struct Sorter {
    stages: Vec<Box<dyn ScoringStage>>,
}

impl Default for Sorter {
    /// A sorter with the default composite scoring stage.
    fn default() -> Self {
        Self {
            stages: vec![Box::new(ScoreStage)],
        }
    }
}

impl Sorter {
    /// A sorter with no stages; items pass through untouched.
    pub fn empty() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push_stage(&mut self, stage: Box<dyn ScoringStage>) {
        self.stages.push(stage);
    }

    pub fn with_stage(mut self, stage: Box<dyn ScoringStage>) -> Self {
        self.push_stage(stage);
        self
    }

    /// Apply every stage in order. The loop aborts before a stage begins
    /// if `cancel` is already set, returning whatever has been produced so
    /// far. A failing stage is logged and skipped fail-open.
    pub fn sort(
        &self,
        mut items: Vec<Item>,
        query: &Query,
        cancel: &CancellationToken,
    ) -> (Vec<Item>, Vec<StageStat>) {
        let mut stats = Vec::with_capacity(self.stages.len());
        for stage in &self.stages {
            if cancel.is_cancelled() {
                break;
            }
            let started = Instant::now();
            let skipped = match stage.apply(&mut items, query, cancel) {
                Ok(()) => false,
                Err(error) => {
                    warn!(stage = stage.name(), error = %error, "scoring stage failed, skipping");
                    true
                }
            };
            stats.push(StageStat {
                stage: stage.name().to_string(),
                duration: started.elapsed(),
                skipped,
            });
        }
        (items, stats)
    }
}
