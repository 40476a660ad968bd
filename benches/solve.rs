use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crra_gamma::{GammaSolver, LotteryInput, SearchConfig};

fn bench_solve(c: &mut Criterion) {
    let lottery = LotteryInput::new(20_000.0, 0.5, 110.0, 100.0).expect("valid lottery");

    c.bench_function("solve_reference_lottery", |b| {
        let solver = GammaSolver::new(lottery, SearchConfig::default()).expect("valid config");
        b.iter(|| black_box(solver.solve()))
    });

    c.bench_function("solve_normalized_many_doublings", |b| {
        let wide = LotteryInput::new(20_000.0, 0.5, 150.0, 100.0).expect("valid lottery");
        let config = SearchConfig::default().with_normalized_wealth(true);
        let solver = GammaSolver::new(wide, config).expect("valid config");
        b.iter(|| black_box(solver.solve()))
    });

    c.bench_function("sample_curve", |b| {
        let result = GammaSolver::new(lottery, SearchConfig::default())
            .and_then(|solver| solver.solve())
            .expect("gamma found");
        b.iter(|| black_box(result.curve().map(|point| point.difference).sum::<f64>()))
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
