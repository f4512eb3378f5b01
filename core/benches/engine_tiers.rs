use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sapper_core::{GameConfig, GameId, GameSession, LayoutGenerator, MineLayout, RandomLayoutGenerator};
use std::hint::black_box;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::new_unchecked(9, 9, 10)),
    ("expert", GameConfig::new_unchecked(30, 16, 99)),
    ("dense", GameConfig::new_unchecked(30, 16, 400)),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(RandomLayoutGenerator::new(seed).generate(config).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // a single mine in the corner makes the first move open the whole board
    let mut group = c.benchmark_group("flood_fill");
    for size in [16, 64, 256] {
        let layout = MineLayout::from_mine_coords((size, size), &[(size - 1, size - 1)]).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &layout, |b, layout| {
            b.iter(|| {
                let mut session = GameSession::new(GameId::new_v4(), layout.clone());
                black_box(session.open_cell((0, 0)).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
