use std::fs::File;
use std::io::BufWriter;

use anyhow::{bail, Context, Result};
use sft_core::{keyword_preset, LoaderConfig, PipelineConfig};
use sft_pipeline::{preview as sample_preview, ConversionPipeline, Report};
use tracing::info;

use crate::cli::{ConvertArgs, PipelineArgs, PreviewArgs};

const PREVIEW_WIDTH: usize = 80;

/// Merge the config file (if any) with command-line overrides.
pub fn build_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let mut config = match (&args.config, &args.assistant) {
        (Some(path), _) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        (None, Some(name)) => PipelineConfig::new(name.clone()),
        (None, None) => bail!("--assistant is required when no --config is given"),
    };
    if let Some(name) = &args.assistant {
        config.assistant_identity = name.clone();
    }
    if let Some(minutes) = args.gap_minutes {
        config.gap_threshold_minutes = minutes;
    }
    if let Some(name) = &args.filter_preset {
        let keywords =
            keyword_preset(name).with_context(|| format!("unknown filter preset: {name}"))?;
        config.extend_keywords(keywords);
    }
    config.extend_keywords(args.forbid.iter().cloned());
    config.validate()?;
    Ok(config)
}

pub fn build_loader_config(args: &PipelineArgs) -> Result<LoaderConfig> {
    if !args.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", args.delimiter);
    }
    Ok(LoaderConfig {
        has_header: args.has_header,
        delimiter: args.delimiter as u8,
    })
}

/// Run every input as its own log and concatenate the results in argument order.
fn run_all(args: &PipelineArgs) -> Result<Report> {
    let pipeline = ConversionPipeline::new(build_config(args)?)?;
    let loader = build_loader_config(args)?;

    let mut report = Report {
        keywords: pipeline.config.forbidden_keywords.clone(),
        ..Report::default()
    };
    for path in &args.inputs {
        let part = pipeline
            .run_csv_file(path, &loader)
            .with_context(|| format!("failed to process {}", path.display()))?;
        report.merge(part);
    }
    Ok(report)
}

fn print_samples(report: &Report, n: usize, width: usize) {
    let samples = sample_preview(&report.turns, n, width);
    if samples.is_empty() {
        return;
    }
    println!("\nSamples ({}):", samples.len());
    for sample in samples {
        println!("{sample}");
    }
}

pub fn convert(args: ConvertArgs) -> Result<()> {
    let report = run_all(&args.pipeline)?;

    let file = File::create(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let written = report.write_jsonl(BufWriter::new(file))?;
    info!(path = %args.out.display(), lines = written, "wrote training data");

    if let Some(path) = &args.stats_json {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report.stats)?;
    }

    print!("{}", report.summary());
    println!("Output: {}", args.out.display());
    print_samples(&report, args.samples, PREVIEW_WIDTH);
    Ok(())
}

pub fn preview(args: PreviewArgs) -> Result<()> {
    let report = run_all(&args.pipeline)?;
    print!("{}", report.summary());
    print_samples(&report, args.samples, args.width);
    Ok(())
}
