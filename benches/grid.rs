use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use arcade_lab::core::Coord;
use arcade_lab::games::color_fill::{ColorIndex, Grid, Palette};
use arcade_lab::games::scavenger::{Scavenger, ScavengerConfig};
use arcade_lab::games::wormy::{Wormy, WormyConfig};

/// Stripe pattern that leaves every third cell open.
fn striped(size: usize) -> Grid {
    let mut grid = Grid::square(size, Palette::standard(4));
    for row in 0..size as i32 {
        for col in 0..size as i32 {
            if (row + col) % 3 != 0 {
                grid.assign(Coord::new(row, col), ColorIndex(((row + 2 * col) % 4) as u8));
            }
        }
    }
    grid
}

fn bench_valid_colors(c: &mut Criterion) {
    let mut group = c.benchmark_group("valid_colors");
    for size in [5, 32] {
        let grid = striped(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| {
                let mut total = 0;
                for row in 0..size as i32 {
                    for col in 0..size as i32 {
                        total += grid.valid_colors(black_box(Coord::new(row, col))).len();
                    }
                }
                total
            })
        });
    }
    group.finish();
}

fn bench_blocked_cells(c: &mut Criterion) {
    let grid = striped(32);
    c.bench_function("blocked_cells_32", |b| b.iter(|| black_box(&grid).blocked_cells()));
}

fn bench_wormy_second(c: &mut Criterion) {
    c.bench_function("wormy_one_second", |b| {
        b.iter_with_setup(
            || Wormy::new(WormyConfig::default(), 7),
            |mut game| {
                game.tick(Duration::from_secs(1));
                game
            },
        )
    });
}

fn bench_scavenger_second(c: &mut Criterion) {
    c.bench_function("scavenger_one_second", |b| {
        b.iter_with_setup(
            || Scavenger::new(ScavengerConfig::default(), 7),
            |mut game| {
                game.tick(Duration::from_secs(1));
                game
            },
        )
    });
}

criterion_group!(
    benches,
    bench_valid_colors,
    bench_blocked_cells,
    bench_wormy_second,
    bench_scavenger_second
);
criterion_main!(benches);
