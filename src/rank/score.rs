//! Default composite scoring: kind weight, title match quality, usage
//! history. Decorate–sort–undecorate so each score is computed once.

use super::stage::ScoringStage;
use crate::model::{Item, ItemKind, MatchSpan, Query};
use tokio_util::sync::CancellationToken;

const KIND_FACTOR: f64 = 1_000_000.0;
const MATCH_FACTOR: f64 = 10_000.0;
const RECENCY_FACTOR: f64 = 100.0;
const FREQUENCY_FACTOR: f64 = 10.0;

const EXACT_TITLE_SCORE: f64 = 1000.0;
const SPAN_BASE_SCORE: f64 = 400.0;
const SPAN_RATIO_BONUS: f64 = 100.0;
const SPAN_AT_START_BONUS: f64 = 300.0;
const SPAN_FULL_QUERY_BONUS: f64 = 200.0;
const PREFIX_FALLBACK_SCORE: f64 = 500.0;
const CONTAINS_FALLBACK_SCORE: f64 = 300.0;

/// The stock scoring stage installed by `Sorter::default()`.
pub struct ScoreStage;

impl ScoringStage for ScoreStage {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn apply(
        &self,
        items: &mut Vec<Item>,
        query: &Query,
        _cancel: &CancellationToken,
    ) -> anyhow::Result<()> {
        let needle = query.text.trim().to_lowercase();

        let mut decorated: Vec<(f64, f64, Item)> = std::mem::take(items)
            .into_iter()
            .map(|item| {
                let match_score = title_match_score(&item, &needle);
                let composite = kind_weight(item.kind) * KIND_FACTOR
                    + match_score * MATCH_FACTOR
                    + item.scoring.recency * RECENCY_FACTOR
                    + item.scoring.frequency * FREQUENCY_FACTOR;
                (composite, match_score, item)
            })
            .collect();

        // stable sort: equal scores preserve arrival order, so the same
        // input always yields the same output
        decorated.sort_by(|a, b| b.0.total_cmp(&a.0));

        items.extend(
            decorated
                .into_iter()
                .map(|(composite, match_score, mut item)| {
                    item.scoring.match_score = match_score;
                    item.scoring.final_score = composite;
                    item
                }),
        );
        Ok(())
    }
}

fn kind_weight(kind: ItemKind) -> f64 {
    match kind {
        ItemKind::Application => 9.0,
        ItemKind::Feature => 7.0,
        ItemKind::File => 6.0,
        ItemKind::Folder => 5.0,
        ItemKind::Document => 4.0,
        ItemKind::Image => 3.0,
        ItemKind::Text => 1.0,
        ItemKind::Other => 0.0,
    }
}

/// Match quality of the item's title against the query text. Prefers the
/// source-reported match span; falls back to plain substring checks when
/// no span was recorded.
fn title_match_score(item: &Item, needle: &str) -> f64 {
    if needle.is_empty() {
        return 0.0;
    }
    let title = item.render.title.to_lowercase();
    if title == needle {
        return EXACT_TITLE_SCORE;
    }
    if let Some(span) = item.extension.match_span {
        return span_score(span, title.len(), needle.len());
    }
    if title.starts_with(needle) {
        PREFIX_FALLBACK_SCORE
    } else if title.contains(needle) {
        CONTAINS_FALLBACK_SCORE
    } else {
        0.0
    }
}

fn span_score(span: MatchSpan, title_len: usize, query_len: usize) -> f64 {
    if span.is_empty() || title_len == 0 {
        return 0.0;
    }
    let mut score = SPAN_BASE_SCORE + SPAN_RATIO_BONUS * span.len() as f64 / title_len as f64;
    if span.start == 0 {
        score += SPAN_AT_START_BONUS;
    }
    if span.len() == query_len {
        score += SPAN_FULL_QUERY_BONUS;
    }
    score
}
