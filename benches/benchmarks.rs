use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

use pawl::{
    apply_middleware, compose, create_store, Dispatch, Middleware, Observable, Store, StoreAction,
};

#[derive(Debug, Clone, Copy)]
enum Counter {
    Add(u64),
}

fn counter(state: Option<u64>, action: StoreAction<&Counter>) -> u64 {
    let state = state.unwrap_or(0);
    match action {
        StoreAction::Action(Counter::Add(value)) => state + value,
        _ => state,
    }
}

fn store_creation_benchmark(c: &mut Criterion) {
    c.bench_function("store_creation", |b| {
        b.iter(|| {
            let store: Store<u64, Counter> = Store::new(counter);
            store
        });
    });
}

fn state_read_benchmark(c: &mut Criterion) {
    let store: Store<u64, Counter> = Store::with_preloaded(counter, 42);

    c.bench_function("state_read", |b| {
        b.iter(|| {
            black_box(store.state().unwrap());
        });
    });
}

fn dispatch_benchmark(c: &mut Criterion) {
    let store: Store<u64, Counter> = Store::new(counter);

    c.bench_function("dispatch", |b| {
        b.iter(|| {
            store.dispatch(Counter::Add(black_box(1))).unwrap();
        });
    });
}

fn dispatch_with_listeners_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_with_listeners");

    for listener_count in [1, 10, 100].iter() {
        let store: Store<u64, Counter> = Store::new(counter);

        for _ in 0..*listener_count {
            store
                .subscribe(|| {
                    // Empty listener
                })
                .unwrap();
        }

        group.bench_with_input(
            BenchmarkId::from_parameter(listener_count),
            listener_count,
            |b, _| {
                b.iter(|| {
                    store.dispatch(Counter::Add(black_box(1))).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn middleware_chain_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("middleware_chain");

    for chain_length in [1, 4, 16].iter() {
        let middleware: Vec<Middleware<u64, Counter>> = (0..*chain_length)
            .map(|_| -> Middleware<u64, Counter> {
                Box::new(|_api| Box::new(|next: Dispatch<Counter>| next))
            })
            .collect();
        let store = create_store(counter, None, Some(apply_middleware(middleware))).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(chain_length),
            chain_length,
            |b, _| {
                b.iter(|| {
                    store.dispatch(Counter::Add(black_box(1))).unwrap();
                });
            },
        );
    }
    group.finish();
}

fn compose_benchmark(c: &mut Criterion) {
    c.bench_function("compose_16", |b| {
        b.iter(|| {
            let funcs: Vec<Box<dyn FnOnce(u64) -> u64>> =
                (0..16).map(|_| -> Box<dyn FnOnce(u64) -> u64> { Box::new(|x| x + 1) }).collect();
            black_box(compose(funcs)(black_box(0)))
        });
    });
}

fn observe_benchmark(c: &mut Criterion) {
    let store: Store<u64, Counter> = Store::new(counter);
    let sink = Arc::new(std::sync::atomic::AtomicU64::new(0));

    let sink_clone = sink.clone();
    store
        .observe(move |state: &u64| {
            sink_clone.store(*state, std::sync::atomic::Ordering::Relaxed);
        })
        .unwrap();

    c.bench_function("dispatch_observed", |b| {
        b.iter(|| {
            store.dispatch(Counter::Add(black_box(1))).unwrap();
        });
    });
}

criterion_group!(
    benches,
    store_creation_benchmark,
    state_read_benchmark,
    dispatch_benchmark,
    dispatch_with_listeners_benchmark,
    middleware_chain_benchmark,
    compose_benchmark,
    observe_benchmark,
);
criterion_main!(benches);
