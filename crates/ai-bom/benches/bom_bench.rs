//! AI-BOM 벤치마크
//!
//! 모델 식별 단계별 비용과 BOM 생성/직렬화 성능을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mcp_audit_ai_bom::{
    BomBuilder, ConfigModelDetector, DetectedModel, ModelIdentifier, ScanResult, identify_model,
};

fn bench_identify(c: &mut Criterion) {
    let identifier = ModelIdentifier::builtin();
    let mut group = c.benchmark_group("identify");

    for (tier, input) in [
        ("exact", "claude-3-opus"),
        ("prefix", "gpt-4o-2024-08-06"),
        ("substring", "anthropic.claude-3-5-sonnet-20241022-v2:0"),
        ("keyword", "tinylama-1.1b-chat"),
        ("generic", "acme-internal-model-v7"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(tier), input, |b, input| {
            b.iter(|| identifier.identify(black_box(input)))
        });
    }

    group.finish();
}

fn sample_results(n: usize) -> Vec<ScanResult> {
    let models = ["gpt-4o", "claude-3-haiku", "llama3.2", "mistral-small", "qwen-2.5"];
    (0..n)
        .map(|i| {
            let mut result = ScanResult::new(format!("mcp-{i}"));
            result.server_type = "npm".to_owned();
            result.found_in = "Claude Desktop".to_owned();
            result.risk_flags.insert("network-access".to_owned());
            let value = models[i % models.len()];
            if let Some(info) = identify_model(value) {
                result.model = Some(DetectedModel::from_env("MODEL", value, info));
            }
            result
        })
        .collect()
}

fn bench_detect(c: &mut Criterion) {
    let detector = ConfigModelDetector::builtin();
    let mut result = ScanResult::new("bench");
    for key in ["PATH", "HOME", "OPENAI_API_KEY", "LOG_LEVEL"] {
        result.env.insert(key.to_owned(), "x".into());
    }
    result
        .env
        .insert("OPENAI_MODEL".to_owned(), "gpt-4o-mini-2024-07-18".into());

    c.bench_function("detect_env_last_key", |b| {
        b.iter(|| detector.detect_for(black_box(&result)))
    });
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("bom_build");

    for size in [10usize, 100, 1000] {
        let results = sample_results(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("json", size), &results, |b, results| {
            b.iter(|| {
                BomBuilder::new()
                    .build(black_box(results))
                    .and_then(|doc| doc.to_json())
            })
        });
        group.bench_with_input(BenchmarkId::new("xml", size), &results, |b, results| {
            b.iter(|| {
                BomBuilder::new()
                    .build(black_box(results))
                    .and_then(|doc| doc.to_xml())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_identify, bench_detect, bench_build);
criterion_main!(benches);
