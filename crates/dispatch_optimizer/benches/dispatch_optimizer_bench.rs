use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use dispatch_optimizer::{
    Solver,
    packing::packer::pack_loads,
    problem::{kmh::Kmh, travel_matrix::TravelMatrices},
    scenario,
    solver::solver_params::SolverParams,
};
use jiff::SignedDuration;

fn travel_matrix_benchmark(c: &mut Criterion) {
    let request = scenario::single_depot(1, 200, 10);
    let coordinates = std::iter::once(request.depot)
        .chain(request.orders().iter().map(|order| order.location()))
        .collect::<Vec<_>>();

    c.bench_function("travel matrices (201 nodes)", |b| {
        b.iter(|| TravelMatrices::from_coordinates(black_box(&coordinates), Kmh::default(), 1.6))
    });
}

fn solve_benchmark(c: &mut Criterion) {
    let request = scenario::single_depot(1, 50, 5);
    let vehicles = request.vehicles();
    let orders = request.orders();
    let solver = Solver::new(SolverParams {
        time_budget: SignedDuration::from_secs(10),
        dispatch_hour: Some(13),
        max_iterations: Some(100),
        ..SolverParams::default()
    });

    let mut group = c.benchmark_group("solve");
    group.sample_size(10);
    group.bench_function("single depot (50 orders)", |b| {
        b.iter(|| solver.solve(request.depot, black_box(&vehicles), black_box(&orders)))
    });
    group.finish();
}

fn packing_benchmark(c: &mut Criterion) {
    let (bins, items) = scenario::packing(42, 500).specs();

    c.bench_function("pack loads (500 items)", |b| {
        b.iter(|| pack_loads(black_box(&bins), black_box(&items)))
    });
}

criterion_group!(
    benches,
    travel_matrix_benchmark,
    solve_benchmark,
    packing_benchmark
);
criterion_main!(benches);
