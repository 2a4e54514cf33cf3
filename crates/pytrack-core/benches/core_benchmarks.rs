//! Benchmarks for pytrack-core: page cache hot paths.
//!
//! Performance targets:
//! - Cache hit through `get_text`: < 10µs
//! - Raw seeded lookup: < 1µs
//! - Body Arc clone: < 10ns
//! - Concurrent hits (10 tasks): < 200µs

use criterion::{Criterion, criterion_group, criterion_main};
use pytrack_core::PageCache;
use std::hint::black_box;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Downloads-page-sized HTML body.
fn sample_body(rows: usize) -> String {
    let mut body = String::from("<html><body><ol>");
    for i in 0..rows {
        body.push_str(&format!(
            "<li><span class=\"release-number\">Python 3.{i}.0</span>\
             <span class=\"release-date\">Oct. 2, 2023</span></li>"
        ));
    }
    body.push_str("</ol></body></html>");
    body
}

/// Benchmark cache lookups.
///
/// Hits are the steady state: every tracker query after the first reads
/// from the cache.
fn bench_cache_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_hits");

    let cache = PageCache::new();
    let body = sample_body(200);
    let url = "https://www.python.org/downloads";
    cache.insert_for_bench(url.to_string(), &body);

    let rt = Runtime::new().unwrap();

    group.bench_function("hit_through_get_text", |b| {
        b.iter(|| rt.block_on(cache.get_text(black_box(url))));
    });

    group.bench_function("seeded_lookup", |b| {
        b.iter(|| cache.get_for_bench(black_box(url)));
    });

    group.bench_function("miss_lookup", |b| {
        b.iter(|| cache.get_for_bench(black_box("https://example.invalid/other")));
    });

    group.finish();
}

/// Benchmark sharing cached bodies.
///
/// Bodies hand out `Arc<str>` clones; this shows the cost against copying
/// the text.
fn bench_body_sharing(c: &mut Criterion) {
    let mut group = c.benchmark_group("body_sharing");

    let owned = sample_body(200);
    let shared: Arc<str> = Arc::from(owned.as_str());

    group.bench_function("arc_clone", |b| {
        b.iter(|| Arc::clone(black_box(&shared)));
    });

    group.bench_function("string_clone", |b| {
        b.iter(|| black_box(&owned).clone());
    });

    group.finish();
}

/// Benchmark concurrent cache hits across spawned tasks.
fn bench_concurrent_hits(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let cache = Arc::new(PageCache::new());
    let body = sample_body(200);
    for i in 0..100 {
        cache.insert_for_bench(format!("https://example.invalid/page-{i}"), &body);
    }

    c.bench_function("concurrent_hits_10_tasks", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut handles = Vec::new();
                for i in 0..10 {
                    let cache = Arc::clone(&cache);
                    handles.push(tokio::spawn(async move {
                        cache
                            .get_text(&format!("https://example.invalid/page-{}", i % 100))
                            .await
                    }));
                }
                for handle in handles {
                    let _ = handle.await;
                }
            });
        });
    });
}

criterion_group!(
    benches,
    bench_cache_hits,
    bench_body_sharing,
    bench_concurrent_hits
);
criterion_main!(benches);
