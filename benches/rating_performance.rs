//! Performance benchmarks for rating calculations and pair selection

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use podium::rating::{score_duel, win_probability};
use podium::{LadderManager, SelectionMode};

fn create_bench_ladder(item_count: usize) -> (LadderManager, Vec<String>) {
    let manager = LadderManager::with_defaults();

    let candidates: Vec<String> = (0..item_count)
        .map(|index| format!("picture-{:05}.jpg", index))
        .collect();
    for id in &candidates {
        manager.resolve(id).unwrap();
    }

    (manager, candidates)
}

fn bench_score_duel(c: &mut Criterion) {
    c.bench_function("score_duel", |b| {
        b.iter(|| score_duel(black_box(1523.7), black_box(1478.2), black_box(32.0)))
    });

    c.bench_function("win_probability", |b| {
        b.iter(|| win_probability(black_box(1523.7), black_box(1478.2)))
    });
}

fn bench_apply_outcome(c: &mut Criterion) {
    let (manager, candidates) = create_bench_ladder(100);

    c.bench_function("apply_outcome", |b| {
        let mut index = 0usize;
        b.iter(|| {
            let winner = &candidates[index % candidates.len()];
            let loser = &candidates[(index + 1) % candidates.len()];
            index += 1;
            manager
                .apply_outcome(black_box(winner), black_box(loser), 32.0)
                .unwrap()
        })
    });
}

fn bench_pair_selection(c: &mut Criterion) {
    let (manager, candidates) = create_bench_ladder(1000);

    c.bench_function("select_pair_unconstrained_1000", |b| {
        b.iter(|| {
            manager
                .select_pair(black_box(&candidates), SelectionMode::Unconstrained)
                .unwrap()
        })
    });

    // Closeness mode resolves every candidate per call; this is the
    // O(candidates) path flagged in the design notes
    c.bench_function("select_pair_closeness_1000", |b| {
        b.iter(|| {
            manager
                .select_pair(
                    black_box(&candidates),
                    SelectionMode::Closeness { threshold: 300.0 },
                )
                .unwrap()
        })
    });
}

fn bench_ranked_list(c: &mut Criterion) {
    let (manager, candidates) = create_bench_ladder(1000);
    for pair in candidates.chunks(2) {
        if let [winner, loser] = pair {
            manager.apply_outcome(winner, loser, 32.0).unwrap();
        }
    }

    c.bench_function("ranked_list_1000", |b| {
        b.iter(|| manager.ranked_list(black_box(true)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_score_duel,
    bench_apply_outcome,
    bench_pair_selection,
    bench_ranked_list
);
criterion_main!(benches);
