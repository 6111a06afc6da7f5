//! Benchmarks for the Game of Life transition function.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use conway_life::{
    compute::{Grid, Simulation, step},
    schema::{Pattern, Preset, Seed},
};

fn seeded_grid(size: usize) -> Grid {
    let mut grid = Grid::new(size, size).unwrap();
    let seed = Seed {
        patterns: vec![Pattern::Random {
            density: 0.3,
            seed: 42,
        }],
    };
    seed.apply(&mut grid).unwrap();
    grid
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for size in [69, 128, 256, 512, 1024] {
        let grid = seeded_grid(size);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &grid,
            |b, grid| {
                b.iter(|| step(black_box(grid)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_glider_gun(c: &mut Criterion) {
    let mut grid = Grid::new(69, 69).unwrap();
    let seed = Seed {
        patterns: vec![Pattern::Preset {
            preset: Preset::GliderGun,
            origin: (0, 0),
        }],
    };
    seed.apply(&mut grid).unwrap();

    c.bench_function("glider_gun_100_generations", |b| {
        b.iter(|| {
            let mut simulation = Simulation::new(grid.clone());
            simulation.run(black_box(100)).unwrap();
            simulation.generation()
        });
    });
}

criterion_group!(benches, bench_step, bench_glider_gun);
criterion_main!(benches);
