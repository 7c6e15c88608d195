//! Contract conformance of the in-memory reference source.

#[cfg(test)]
mod tests {
    use tokio_util::sync::CancellationToken;

    use crate::model::{Item, ItemKind, MatchSpan, Query};
    use crate::sources::{FixedSource, Source};

    fn source() -> FixedSource {
        FixedSource::new(
            "apps",
            "Applications",
            vec![
                Item::new("calc", ItemKind::Application, "Calculator"),
                Item::new("term", ItemKind::Application, "Terminal"),
                Item::new("img", ItemKind::Image, "screenshot.png"),
            ],
        )
    }

    #[test]
    fn reports_the_match_span_of_the_first_hit() {
        let hits = tokio_test::block_on(
            source().search(&Query::new("cal"), CancellationToken::new()),
        )
        .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "calc");
        assert_eq!(
            hits[0].extension.match_span,
            Some(MatchSpan { start: 0, end: 3 })
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let hits = tokio_test::block_on(
            source().search(&Query::new("TERM"), CancellationToken::new()),
        )
        .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "term");
        assert_eq!(
            hits[0].extension.match_span,
            Some(MatchSpan { start: 0, end: 4 })
        );
    }

    #[test]
    fn empty_query_returns_the_full_list() {
        let hits = tokio_test::block_on(
            source().search(&Query::new("   "), CancellationToken::new()),
        )
        .unwrap();

        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.extension.match_span.is_none()));
    }

    #[test]
    fn lifecycle_hooks_default_to_noops() {
        let src = source();
        let item = Item::new("calc", ItemKind::Application, "Calculator");
        tokio_test::block_on(async {
            assert!(src.load().await.is_ok());
            assert!(src.execute(&item).await.is_ok());
            assert!(src.deactivate().await.is_ok());
        });
    }
}
