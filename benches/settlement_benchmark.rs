use criterion::{black_box, criterion_group, criterion_main, Criterion};
use split_engine::engine::balance::BalanceCalculator;
use split_engine::engine::settlement::SettlementPlanner;
use split_engine::simulation::generator::{generate_random_group, GroupConfig};

fn bench_settle_10_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 10,
        expense_count: 50,
        ..Default::default()
    };
    let group = generate_random_group(&config);

    c.bench_function("settle_10_members", |b| {
        b.iter(|| {
            let sheet = BalanceCalculator::compute_snapshot(black_box(&group));
            SettlementPlanner::plan(&sheet)
        })
    });
}

fn bench_settle_100_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 100,
        expense_count: 500,
        ..Default::default()
    };
    let group = generate_random_group(&config);

    c.bench_function("settle_100_members", |b| {
        b.iter(|| {
            let sheet = BalanceCalculator::compute_snapshot(black_box(&group));
            SettlementPlanner::plan(&sheet)
        })
    });
}

fn bench_settle_1000_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 1000,
        expense_count: 5000,
        ..Default::default()
    };
    let group = generate_random_group(&config);

    c.bench_function("settle_1000_members", |b| {
        b.iter(|| {
            let sheet = BalanceCalculator::compute_snapshot(black_box(&group));
            SettlementPlanner::plan(&sheet)
        })
    });
}

criterion_group!(
    benches,
    bench_settle_10_members,
    bench_settle_100_members,
    bench_settle_1000_members
);
criterion_main!(benches);
