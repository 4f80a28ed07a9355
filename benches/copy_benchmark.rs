//! Benchmarks for flatcopy

use criterion::{
    criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use flatcopy::config::{CopyConfig, DestLayout};
use flatcopy::core::{CopyEngine, WorkQueue};
use flatcopy::fs::{copy_file, default_buffer_size, scan_tree};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn create_test_file(path: &Path, size: usize) {
    let mut file = File::create(path).unwrap();
    let chunk = vec![0xABu8; 8192];
    let mut written = 0;
    while written < size {
        let n = chunk.len().min(size - written);
        file.write_all(&chunk[..n]).unwrap();
        written += n;
    }
}

fn bench_copy_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_file");

    for size in [4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let temp = TempDir::new().unwrap();
            let source = temp.path().join("source.bin");
            let dest = temp.path().join("dest.bin");
            create_test_file(&source, size);
            let buffer_size = default_buffer_size();

            b.iter(|| copy_file(&source, &dest, buffer_size).unwrap());
        });
    }

    group.finish();
}

fn bench_engine_small_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(10);
    group.throughput(Throughput::Bytes(100 * 4096));

    group.bench_function("100_small_files", |b| {
        b.iter_batched(
            || {
                let temp = TempDir::new().unwrap();
                let source = temp.path().join("source");
                let dest = temp.path().join("dest");
                fs::create_dir_all(&source).unwrap();
                fs::create_dir_all(&dest).unwrap();
                for i in 0..100 {
                    create_test_file(&source.join(format!("file-{:03}.dat", i)), 4096);
                }
                let config = CopyConfig {
                    source,
                    destination: dest,
                    threads: 4,
                    buffer_size: default_buffer_size(),
                    layout: DestLayout::Flat,
                    log_file: temp.path().join("log.csv"),
                    quiet: true,
                };
                (temp, config)
            },
            |(_temp, config)| CopyEngine::new(config).execute().unwrap(),
            BatchSize::PerIteration,
        );
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    for d in 0..10 {
        let dir = temp.path().join(format!("dir-{}", d));
        fs::create_dir_all(&dir).unwrap();
        for i in 0..100 {
            create_test_file(&dir.join(format!("f{}.dat", i)), 64);
        }
    }

    c.bench_function("scan_1000_files", |b| {
        b.iter(|| scan_tree(temp.path()).unwrap());
    });
}

fn bench_queue(c: &mut Criterion) {
    c.bench_function("queue_claim_10k", |b| {
        b.iter_batched(
            || WorkQueue::new(10_000),
            |queue| while queue.claim_next().is_some() {},
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_copy_file,
    bench_engine_small_files,
    bench_scan,
    bench_queue
);
criterion_main!(benches);
