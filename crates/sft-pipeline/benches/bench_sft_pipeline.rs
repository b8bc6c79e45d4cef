use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sft_core::{messenger_placeholders, LoaderConfig, PipelineConfig, RawMessage};
use sft_pipeline::{ConversionPipeline, LineFilter};

const WORDS: &[&str] = &[
    "밥 먹었어?", "응 방금", "사진", "이모티콘", "오늘 뭐해", "회사 끝나고 보자",
    "ok", "파일: report.pdf", "ㅋㅋㅋ", "어디야", "위치: 강남역", "곧 도착",
];

fn generate_log(n: usize) -> Vec<RawMessage> {
    let mut rng = StdRng::seed_from_u64(1);
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let mut minute = 0;
    (0..n)
        .map(|_| {
            minute += if rng.gen_bool(0.05) { 120 } else { rng.gen_range(0..3) };
            let sender = if rng.gen_bool(0.5) { "A" } else { "B" };
            let text = WORDS[rng.gen_range(0..WORDS.len())];
            RawMessage::new(start + Duration::minutes(minute), sender, text)
        })
        .collect()
}

fn generate_csv(n: usize) -> String {
    generate_log(n)
        .iter()
        .map(|m| format!("{},{},{}\n", m.timestamp.format("%Y-%m-%d %H:%M:%S"), m.sender, m.text))
        .collect()
}

fn bench_run(c: &mut Criterion) {
    let log_1k = generate_log(1_000);
    let log_100k = generate_log(100_000);

    for (name, keywords) in [("nofilter", Vec::new()), ("messenger", messenger_placeholders())] {
        let pipeline = ConversionPipeline::new(PipelineConfig::new("B").with_keywords(keywords)).unwrap();
        c.bench_function(&format!("run_{name}_1k"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(log_1k.clone()))))
        });
        c.bench_function(&format!("run_{name}_100k"), |b| {
            b.iter(|| black_box(pipeline.run(black_box(log_100k.clone()))))
        });
    }
}

fn bench_csv(c: &mut Criterion) {
    let csv_10k = generate_csv(10_000);
    let pipeline = ConversionPipeline::new(PipelineConfig::new("B")).unwrap();
    let loader = LoaderConfig::default();
    c.bench_function("run_csv_10k", |b| {
        b.iter(|| black_box(pipeline.run_csv(black_box(csv_10k.as_bytes()), &loader).unwrap()))
    });
}

fn bench_filter(c: &mut Criterion) {
    let filter = LineFilter::new(messenger_placeholders());
    let text = WORDS.join("\n").repeat(50);
    c.bench_function("line_filter_600_lines", |b| {
        b.iter(|| black_box(filter.clean(black_box(&text))))
    });
}

criterion_group!(benches, bench_run, bench_csv, bench_filter);
criterion_main!(benches);
