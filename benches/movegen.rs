//! Benchmarks for legal-move generation and full games.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use hanamikoji::core::{ActionFlags, GameConfig, PlayerId, PlayerMap};
use hanamikoji::players::{Player, RandomPlayer};
use hanamikoji::rules::movegen;
use hanamikoji::simulation;
use hanamikoji::CardCounts;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let hands = [
        ("spread", CardCounts::from_array([1, 1, 1, 1, 1, 1, 1])),
        ("pairs", CardCounts::from_array([2, 2, 0, 1, 0, 2, 0])),
        ("heavy", CardCounts::from_array([0, 0, 0, 1, 1, 2, 3])),
    ];

    for (name, hand) in &hands {
        group.bench_with_input(BenchmarkId::new("all_actions", name), hand, |b, hand| {
            b.iter(|| movegen::generate(black_box(hand), &ActionFlags::ALL_AVAILABLE, None));
        });
    }

    group.finish();
}

fn bench_random_game(c: &mut Criterion) {
    c.bench_function("random_game", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let players = PlayerMap::new(|p: PlayerId| {
                Box::new(RandomPlayer::new(seed * 2 + p.index() as u64)) as Box<dyn Player>
            });
            simulation::play_game(GameConfig::default().with_seed(seed), players).map(|o| o.moves)
        });
    });
}

criterion_group!(benches, bench_generate, bench_random_game);
criterion_main!(benches);
