//! Engine benchmarks for paintball_core.
//!
//! Run with: `cargo bench -p paintball_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paintball_core::prelude::*;
use paintball_core::pattern::attack_pattern;

/// Pattern generation on growing fields.
pub fn pattern_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("attack_pattern");
    for size in [10_u32, 50, 200] {
        let centre = Position::new(size / 2, size / 2);
        for color in UnitColor::ALL {
            group.bench_with_input(BenchmarkId::new(color.name(), size), &size, |b, &size| {
                b.iter(|| attack_pattern(black_box(color), black_box(centre), size, size));
            });
        }
    }
    group.finish();
}

/// A full team attack on a field crowded with enemy units.
pub fn team_attack_benchmark(c: &mut Criterion) {
    let mut setup = MatchSetup::new(40, 40).team("home", "home-0").team("away", "away-0");
    for i in 0..20_i64 {
        setup = setup
            .bunker(i * 2 + 1, 1, 100, format!("home-{i}"))
            .bunker(i * 2 + 1, 40, 100, format!("away-{i}"));
    }

    c.bench_function("team_attack", |b| {
        b.iter_batched(
            || {
                let mut game = setup.build().expect("valid setup");
                for i in 0..20 {
                    let _ = game.create_unit("green", &format!("home-{i}"));
                    let _ = game.create_unit("blue", &format!("away-{i}"));
                }
                game
            },
            |mut game| black_box(game.current_team_attacks()),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, pattern_benchmark, team_attack_benchmark);
criterion_main!(benches);
