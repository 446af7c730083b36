//! Benchmarks for store dispatch.
//!
//! These benchmarks measure the cost of a full add/save cycle and of a
//! guard-rejected dispatch against collections of different sizes.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use edit_session::{Action, Employee, SessionState, Store};

fn seeded_store(count: u64) -> Store {
    let records = (1..=count)
        .map(|id| Employee {
            name: format!("Employee {}", id),
            ..Employee::blank(id, chrono::Utc::now())
        })
        .collect();
    Store::new(SessionState::seeded(records).expect("seed identifiers are unique"))
}

fn bench_add_and_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_and_save");
    for size in [10u64, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || seeded_store(size),
                |store| {
                    let adding = store.dispatch(Action::StartAdd).unwrap();
                    let record = adding.current_record().unwrap().clone();
                    black_box(store.dispatch(Action::Save(record)).unwrap())
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_edit_and_save(c: &mut Criterion) {
    let store = seeded_store(1_000);
    let record = store.get_state().records()[500].clone();
    c.bench_function("edit_and_save_1000", |b| {
        b.iter(|| {
            store.dispatch(Action::StartEdit(record.clone())).unwrap();
            black_box(store.dispatch(Action::Save(record.clone())).unwrap())
        })
    });
}

fn bench_rejected(c: &mut Criterion) {
    let store = seeded_store(100);
    c.bench_function("rejected_cancel", |b| {
        b.iter(|| black_box(store.dispatch(Action::Cancel).unwrap()))
    });
}

criterion_group!(benches, bench_add_and_save, bench_edit_and_save, bench_rejected);
criterion_main!(benches);
