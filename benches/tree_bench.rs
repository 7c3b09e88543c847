use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rng, Rng};

use ordix::RadixTree;

// Tree populations for the benchmarks that measure retrievals.
const TREE_SIZES: [u64; 3] = [1 << 12, 1 << 16, 1 << 20];

pub fn seq_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_insert");
    group.throughput(Throughput::Elements(1));

    group.bench_function("dense_keys", |b| {
        let mut tree = RadixTree::<u64, u64>::new();
        let mut key = 0u64;
        b.iter(|| {
            tree.insert(key, key);
            key += 1;
        })
    });

    group.bench_function("sparse_keys", |b| {
        let mut tree = RadixTree::<u64, u64>::new();
        let mut key = 0u64;
        b.iter(|| {
            tree.insert(key, key);
            key += 4096;
        })
    });

    group.finish();
}

pub fn rand_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_insert");
    group.throughput(Throughput::Elements(1));

    group.bench_function("u64", |b| {
        let mut tree = RadixTree::<u64, u64>::new();
        let mut rng = rng();
        b.iter(|| {
            let key = rng.random_range(0..1u64 << 40);
            tree.insert(key, key);
        })
    });

    group.finish();
}

pub fn rand_get(c: &mut Criterion) {
    for size in TREE_SIZES {
        c.bench_with_input(BenchmarkId::new("rand_get", size), &size, |b, size| {
            let mut tree = RadixTree::<u64, u64>::new();
            for key in 0..*size {
                tree.insert(key, key);
            }
            let mut rng = rng();
            b.iter(|| {
                let key = rng.random_range(0..*size);
                black_box(tree.get(key));
            })
        });
    }
}

pub fn rand_remove_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_remove_insert");
    group.throughput(Throughput::Elements(1));

    group.bench_function("churn", |b| {
        let mut tree = RadixTree::<u64, u64>::new();
        for key in 0..(1u64 << 16) {
            tree.insert(key * 64, key);
        }
        let mut rng = rng();
        b.iter(|| {
            let key = rng.random_range(0..1u64 << 16) * 64;
            if tree.remove(key).is_none() {
                tree.insert(key, key);
            }
        })
    });

    group.finish();
}

pub fn iter_order(c: &mut Criterion) {
    for size in TREE_SIZES {
        c.bench_with_input(BenchmarkId::new("iter_order", size), &size, |b, size| {
            let mut tree = RadixTree::<u64, u64>::new();
            let mut rng = rng();
            while tree.len() < *size as usize {
                let key = rng.random_range(0..1u64 << 40);
                tree.insert(key, key);
            }
            b.iter(|| {
                let mut sum = 0u64;
                for (_, value) in tree.iter() {
                    sum = sum.wrapping_add(*value);
                }
                black_box(sum)
            })
        });
    }
}

criterion_group!(
    benches,
    seq_insert,
    rand_insert,
    rand_get,
    rand_remove_insert,
    iter_order
);
criterion_main!(benches);
