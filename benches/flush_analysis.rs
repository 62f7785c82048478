//! Flush interval analysis benchmark
//!
//! Measures classification, gap extraction and the buffer-size estimate over
//! synthetic read logs with a flush every 8 reads.
//!
//! ```bash
//! cargo bench --bench flush_analysis
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use flushscope::classifier::ThresholdConfig;
use flushscope::flush::{analyze, estimate, IntervalConfig, IntervalEstimator};
use flushscope::log_loader::LatencyLog;

fn read_log(len: usize) -> LatencyLog {
    let pairs: Vec<(i64, i64)> = (0..len)
        .map(|i| {
            let lat = if i % 8 == 0 { 850 } else { 90 };
            (i as i64 * 10, lat)
        })
        .collect();
    LatencyLog::from_pairs("read.log", &pairs)
}

fn bench_analyze(c: &mut Criterion) {
    let thresholds = ThresholdConfig {
        lat_threshold: 500.0,
        gc_threshold: 5000.0,
    };
    let config = IntervalConfig::default();
    let mut group = c.benchmark_group("flush_analysis");

    for size in [10_000usize, 100_000, 1_000_000] {
        let log = read_log(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("analyze", size), &log, |b, log| {
            b.iter(|| analyze(black_box(log), &thresholds, &config));
        });
    }

    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let thresholds = ThresholdConfig {
        lat_threshold: 500.0,
        gc_threshold: 5000.0,
    };
    let log = read_log(100_000);
    let Ok(analysis) = analyze(&log, &thresholds, &IntervalConfig::default()) else {
        return;
    };

    c.bench_function("estimate_mode_100k", |b| {
        b.iter(|| estimate(black_box(&analysis), 4, IntervalEstimator::Mode));
    });
    c.bench_function("estimate_median_100k", |b| {
        b.iter(|| estimate(black_box(&analysis), 4, IntervalEstimator::Median));
    });
}

criterion_group!(benches, bench_analyze, bench_estimate);
criterion_main!(benches);
