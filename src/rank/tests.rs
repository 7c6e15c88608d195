//! Ranking behavior: determinism, score composition, fail-open stages.

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use crate::model::{Item, ItemKind, MatchSpan, Query};
    use crate::rank::stage::ScoringStage;
    use crate::rank::{ScoreStage, Sorter};

    fn item(id: &str, kind: ItemKind, title: &str) -> Item {
        Item::new(id, kind, title)
    }

    fn sample_items() -> Vec<Item> {
        vec![
            item("txt", ItemKind::Text, "calc notes").with_span(MatchSpan { start: 0, end: 4 }),
            item("app", ItemKind::Application, "Calculator")
                .with_span(MatchSpan { start: 0, end: 4 }),
            item("doc", ItemKind::Document, "Recalculated budget")
                .with_span(MatchSpan { start: 2, end: 6 }),
            item("file", ItemKind::File, "calc.xlsx").with_usage(3.0, 2.0),
        ]
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn sort_is_deterministic() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        let (first, _) = sorter.sort(sample_items(), &query, &cancel);
        let (second, _) = sorter.sort(sample_items(), &query, &cancel);

        assert_eq!(ids(&first), ids(&second));
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.scoring.final_score, b.scoring.final_score);
            assert_eq!(a.scoring.match_score, b.scoring.match_score);
        }
    }

    #[test]
    fn start_of_title_match_outranks_interior_match() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        let (sorted, _) = sorter.sort(
            vec![
                item("interior", ItemKind::Application, "Recalculated")
                    .with_span(MatchSpan { start: 2, end: 6 }),
                item("leading", ItemKind::Application, "Calculator")
                    .with_span(MatchSpan { start: 0, end: 4 }),
            ],
            &query,
            &cancel,
        );

        assert_eq!(ids(&sorted), vec!["leading", "interior"]);
        assert!(sorted[0].scoring.match_score > sorted[1].scoring.match_score);
    }

    #[test]
    fn exact_title_tops_span_matches() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        let (sorted, _) = sorter.sort(
            vec![
                item("span", ItemKind::Application, "Calculator")
                    .with_span(MatchSpan { start: 0, end: 4 }),
                item("exact", ItemKind::Application, "Calc"),
            ],
            &query,
            &cancel,
        );

        assert_eq!(ids(&sorted), vec!["exact", "span"]);
        assert_eq!(sorted[0].scoring.match_score, 1000.0);
    }

    #[test]
    fn kind_weight_dominates_match_quality() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        // a weak application match still beats a perfect plain-text match
        let (sorted, _) = sorter.sort(
            vec![
                item("note", ItemKind::Text, "calculation scratchpad")
                    .with_span(MatchSpan { start: 0, end: 4 }),
                item("app", ItemKind::Application, "The calc thing"),
            ],
            &query,
            &cancel,
        );

        assert_eq!(ids(&sorted), vec!["app", "note"]);
    }

    #[test]
    fn usage_history_breaks_ties() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        let (sorted, _) = sorter.sort(
            vec![
                item("cold", ItemKind::Application, "Calculator")
                    .with_span(MatchSpan { start: 0, end: 4 }),
                item("warm", ItemKind::Application, "Calculator")
                    .with_span(MatchSpan { start: 0, end: 4 })
                    .with_usage(5.0, 3.0),
            ],
            &query,
            &cancel,
        );

        assert_eq!(ids(&sorted), vec!["warm", "cold"]);
    }

    #[test]
    fn substring_fallbacks_without_span() {
        let sorter = Sorter::default();
        let query = Query::new("term");
        let cancel = CancellationToken::new();

        let (sorted, _) = sorter.sort(
            vec![
                item("contains", ItemKind::Application, "xterm emulator"),
                item("prefix", ItemKind::Application, "Terminal"),
                item("miss", ItemKind::Application, "Notepad"),
            ],
            &query,
            &cancel,
        );

        assert_eq!(ids(&sorted), vec!["prefix", "contains", "miss"]);
        assert_eq!(sorted[0].scoring.match_score, 500.0);
        assert_eq!(sorted[1].scoring.match_score, 300.0);
        assert_eq!(sorted[2].scoring.match_score, 0.0);
    }

    struct ExplodingStage;

    impl ScoringStage for ExplodingStage {
        fn name(&self) -> &'static str {
            "exploding"
        }

        fn apply(
            &self,
            _items: &mut Vec<Item>,
            _query: &Query,
            _cancel: &CancellationToken,
        ) -> anyhow::Result<()> {
            anyhow::bail!("stage exploded")
        }
    }

    #[test]
    fn failing_stage_is_skipped_fail_open() {
        let sorter = Sorter::empty()
            .with_stage(Box::new(ExplodingStage))
            .with_stage(Box::new(ScoreStage));
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        let (sorted, stats) = sorter.sort(sample_items(), &query, &cancel);

        assert_eq!(stats.len(), 2);
        assert!(stats[0].skipped);
        assert_eq!(stats[0].stage, "exploding");
        assert!(!stats[1].skipped);
        // ranking still happened
        assert_eq!(sorted[0].id, "app");
        assert!(sorted[0].scoring.final_score > 0.0);
    }

    #[test]
    fn cancelled_token_short_circuits() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let input = sample_items();
        let order_before = ids(&input).iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let (sorted, stats) = sorter.sort(input, &query, &cancel);

        assert!(stats.is_empty());
        assert_eq!(
            ids(&sorted),
            order_before.iter().map(String::as_str).collect::<Vec<_>>()
        );
    }

    #[test]
    fn stage_durations_are_recorded() {
        let sorter = Sorter::default();
        let query = Query::new("calc");
        let cancel = CancellationToken::new();

        let (_, stats) = sorter.sort(sample_items(), &query, &cancel);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].stage, "composite");
        assert!(!stats[0].skipped);
    }
}
