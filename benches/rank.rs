//! Micro-benchmark for the composite scoring stage: the sorter runs on
//! the hot path after every gather and must stay well under the budget
//! the gatherer just enforced.

use std::hint::black_box;

use beacon::model::{Item, ItemKind, MatchSpan, Query};
use beacon::rank::Sorter;
use criterion::{criterion_group, criterion_main, Criterion};
use tokio_util::sync::CancellationToken;

fn kind_for(i: usize) -> ItemKind {
    match i % 5 {
        0 => ItemKind::Application,
        1 => ItemKind::Feature,
        2 => ItemKind::File,
        3 => ItemKind::Document,
        _ => ItemKind::Text,
    }
}

fn synthetic_items(n: usize) -> Vec<Item> {
    (0..n)
        .map(|i| {
            Item::new(format!("item-{i}"), kind_for(i), format!("Calculation {i}"))
                .with_span(MatchSpan { start: 0, end: 4 })
                .with_usage((i % 13) as f64, (i % 7) as f64)
        })
        .collect()
}

fn bench_composite_sort(c: &mut Criterion) {
    let sorter = Sorter::default();
    let query = Query::new("calc");
    let cancel = CancellationToken::new();

    for n in [64, 512] {
        let items = synthetic_items(n);
        c.bench_function(&format!("composite_sort_{n}"), |b| {
            b.iter(|| {
                let (sorted, _) = sorter.sort(black_box(items.clone()), &query, &cancel);
                black_box(sorted)
            })
        });
    }
}

criterion_group!(benches, bench_composite_sort);
criterion_main!(benches);
