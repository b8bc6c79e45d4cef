//! Conversion pipeline — folds a message log into filtered turns.

use crate::accumulator::Accumulator;
use crate::assembler::TurnAssembler;
use crate::filter::LineFilter;
use crate::loader::{self, MessageLog};
use crate::report::Report;
use sft_core::{LoaderConfig, PipelineConfig, RawMessage, Result};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Single-pass converter. Each run owns its own state, so separate logs may be
/// processed independently; one log must not be split across runs.
#[derive(Debug, Clone)]
pub struct ConversionPipeline {
    pub config: PipelineConfig,
}

impl ConversionPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Process messages already sorted by timestamp.
    pub fn run<I>(&self, messages: I) -> Report
    where
        I: IntoIterator<Item = RawMessage>,
    {
        let mut acc = Accumulator::new(&self.config);
        let mut assembler =
            TurnAssembler::new(LineFilter::new(self.config.forbidden_keywords.clone()));

        for msg in messages {
            if let Some(turn) = acc.push(msg) {
                assembler.accept(turn);
            }
        }
        if let Some(turn) = acc.finish() {
            assembler.accept(turn);
        }

        let mut report = assembler.into_report();
        report.sessions = acc.session_count();
        info!(
            total = report.stats.total_turns,
            partial = report.stats.partially_filtered_turns,
            removed = report.stats.completely_removed_turns,
            saved = report.stats.saved_turns,
            sessions = report.sessions,
            "conversion finished"
        );
        report
    }

    pub fn run_log(&self, log: MessageLog) -> Report {
        let skipped = log.skipped_rows;
        let mut report = self.run(log.messages);
        report.skipped_rows = skipped;
        report
    }

    pub fn run_csv<R: Read>(&self, reader: R, loader_config: &LoaderConfig) -> Result<Report> {
        let log = loader::load_csv(reader, loader_config)?;
        Ok(self.run_log(log))
    }

    pub fn run_csv_file(&self, path: impl AsRef<Path>, loader_config: &LoaderConfig) -> Result<Report> {
        let path = path.as_ref();
        let log = loader::load_csv_file(path, loader_config)?;
        info!(path = %path.display(), messages = log.len(), "loaded message log");
        Ok(self.run_log(log))
    }
}
