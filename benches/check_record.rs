//! 检测结果基准测试
//!
//! 测试结果构造与结果行格式化的开销

use criterion::{criterion_group, criterion_main, Criterion};
use site_vitals::health::CheckResult;
use std::hint::black_box;

/// 结果构造与格式化基准测试
fn check_record_benchmark(c: &mut Criterion) {
    c.bench_function("check_result_from_status", |b| {
        b.iter(|| black_box(CheckResult::from_status("https://example.com", black_box(200))));
    });

    let available = CheckResult::from_status("https://example.com", 200);
    c.bench_function("log_line_available", |b| {
        b.iter(|| black_box(available.log_line()));
    });

    let error = CheckResult::from_error(
        "https://example.com",
        "error sending request for url (https://example.com/): connection refused",
    );
    c.bench_function("log_line_error", |b| {
        b.iter(|| black_box(error.log_line()));
    });

    c.bench_function("check_result_json", |b| {
        b.iter(|| black_box(serde_json::to_string(&available).unwrap()));
    });
}

criterion_group!(benches, check_record_benchmark);
criterion_main!(benches);
