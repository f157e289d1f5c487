use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rank_bptree::BPTreeSet;
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<u64> {
    (0..n as u64).collect()
}

fn random_keys(n: usize) -> Vec<u64> {
    // Simple LCG for a deterministic pseudo-random sequence.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push(x >> 33);
    }
    keys
}

// ─── Insert benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("BPTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BPTreeSet::new();
            for i in 0..N as u64 {
                let _ = set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for i in 0..N as u64 {
                set.insert(i);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_reverse");

    group.bench_function(BenchmarkId::new("BPTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BPTreeSet::new();
            for i in (0..N as u64).rev() {
                let _ = set.insert(i);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for i in (0..N as u64).rev() {
                set.insert(i);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("BPTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BPTreeSet::new();
            for &k in &keys {
                let _ = set.insert(k);
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

// ─── Lookup benchmarks ──────────────────────────────────────────────────────

fn bench_contains(c: &mut Criterion) {
    let keys = random_keys(N);
    let bp_set: BPTreeSet<u64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<u64> = keys.iter().copied().collect();
    let probes = random_keys(N / 4);

    let mut group = c.benchmark_group("contains");

    group.bench_function(BenchmarkId::new("BPTreeSet", N), |b| {
        b.iter(|| probes.iter().filter(|k| bp_set.contains(k)).count());
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| probes.iter().filter(|k| bt_set.contains(*k)).count());
    });

    group.finish();
}

// ─── Order-statistic benchmarks ─────────────────────────────────────────────

fn bench_rank_queries(c: &mut Criterion) {
    let set: BPTreeSet<u64> = ordered_keys(N).into_iter().collect();

    let mut group = c.benchmark_group("rank");

    group.bench_function(BenchmarkId::new("rank_of", N), |b| {
        b.iter(|| {
            let mut total = 0usize;
            for k in (0..N as u64).step_by(7) {
                total += set.rank_of(&k).unwrap();
            }
            total
        });
    });

    group.bench_function(BenchmarkId::new("get_by_rank", N), |b| {
        b.iter(|| {
            let mut total = 0u64;
            for r in (0..N).step_by(7) {
                total = total.wrapping_add(set.get_by_rank(r).unwrap());
            }
            total
        });
    });

    group.finish();
}

// ─── Iteration benchmark ────────────────────────────────────────────────────

fn bench_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let bp_set: BPTreeSet<u64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<u64> = keys.iter().copied().collect();

    let mut group = c.benchmark_group("iterate");

    group.bench_function(BenchmarkId::new("BPTreeSet", N), |b| {
        b.iter(|| bp_set.iter().fold(0u64, u64::wrapping_add));
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| bt_set.iter().fold(0u64, |acc, &k| acc.wrapping_add(k)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_reverse,
    bench_insert_random,
    bench_contains,
    bench_rank_queries,
    bench_iterate,
);
criterion_main!(benches);
