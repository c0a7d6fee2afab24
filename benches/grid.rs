//! Grid Cut Benchmarks
//!
//! Solves 4-connected grids with random smoothness weights and random data
//! terms, the shape of graph produced by image segmentation.
//!
//! Run: cargo bench --bench grid

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use graph_cut::maximum_flow::graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn grid(side: usize, seed: u64) -> Graph<i64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_capacity(side * side, 2 * side * side);
    let nodes = graph.add_nodes(side * side).unwrap();

    for y in 0..side {
        for x in 0..side {
            let u = nodes[y * side + x];
            if x + 1 < side {
                let w = rng.gen_range(1..50);
                graph.add_edge(u, u + 1, w, w).unwrap();
            }
            if y + 1 < side {
                let w = rng.gen_range(1..50);
                graph.add_edge(u, u + side, w, w).unwrap();
            }
            graph.set_terminal_weights(u, rng.gen_range(0..100), rng.gen_range(0..100)).unwrap();
        }
    }
    graph
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_cut");
    for side in [32, 64, 128] {
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, &side| {
            b.iter_batched(|| grid(side, 42), |mut graph| graph.solve().unwrap(), BatchSize::LargeInput);
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
