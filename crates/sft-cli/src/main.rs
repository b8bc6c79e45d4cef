//! chat-sft: chat export CSV to JSONL fine-tuning pairs.
//!
//! Logging: set `RUST_LOG=sft_pipeline=debug` (or pass `--verbose`) to see session
//! boundaries and dropped turns on stderr.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "sft_pipeline=debug,chat_sft=debug"
        } else {
            "sft_pipeline=info,chat_sft=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.command {
        Command::Convert(args) => commands::convert(args),
        Command::Preview(args) => commands::preview(args),
    }
}
