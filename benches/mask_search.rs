use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qr_forge::symbol::mask::select_best_mask;
use qr_forge::symbol::penalty::total_penalty;
use qr_forge::{BitMatrix, ECLevel, Version};

fn noisy_grid(size: usize) -> BitMatrix {
    let mut grid = BitMatrix::square(size);
    let mut state = 0x2545_F491u32;
    for y in 0..size {
        for x in 0..size {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            grid.set(x, y, state & 1 == 1);
        }
    }
    grid
}

fn bench_mask_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_search");
    for n in [1u8, 10, 25, 40] {
        let Ok(version) = Version::new(n) else {
            continue;
        };
        let source = noisy_grid(version.size());
        group.bench_with_input(BenchmarkId::new("sequential", n), &source, |b, grid| {
            b.iter(|| select_best_mask(black_box(grid), ECLevel::M, version, false))
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &source, |b, grid| {
            b.iter(|| select_best_mask(black_box(grid), ECLevel::M, version, true))
        });
    }
    group.finish();
}

fn bench_penalty(c: &mut Criterion) {
    let grid = noisy_grid(177);
    c.bench_function("total_penalty_177", |b| {
        b.iter(|| total_penalty(black_box(&grid)))
    });
}

criterion_group!(benches, bench_mask_search, bench_penalty);
criterion_main!(benches);
