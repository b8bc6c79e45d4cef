use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "chat-sft",
    about = "Turn a two-party chat export into single-turn fine-tuning pairs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert chat logs to a JSONL training file.
    Convert(ConvertArgs),
    /// Run the conversion and print statistics and samples without writing output.
    Preview(PreviewArgs),
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// CSV files of `timestamp,sender,text` rows. Each file is an independent log.
    #[arg(required = true, value_name = "CSV")]
    pub inputs: Vec<PathBuf>,

    /// JSON pipeline config. Flags below override its values.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sender mapped to the assistant role. Required without --config.
    #[arg(short, long, value_name = "NAME")]
    pub assistant: Option<String>,

    /// Inactivity gap in minutes that starts a new session.
    #[arg(long = "gap-minutes", value_name = "MIN")]
    pub gap_minutes: Option<i64>,

    /// Remove lines containing this substring. Repeatable.
    #[arg(long = "forbid", value_name = "KEYWORD")]
    pub forbid: Vec<String>,

    /// Built-in keyword preset. Supported: messenger
    #[arg(long = "filter-preset", value_name = "NAME")]
    pub filter_preset: Option<String>,

    /// The first CSV row is a header.
    #[arg(long)]
    pub has_header: bool,

    /// CSV field delimiter.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output JSONL path.
    #[arg(short, long, value_name = "PATH", default_value = "basic_finetuning_data.jsonl")]
    pub out: PathBuf,

    /// Also write the turn statistics as JSON.
    #[arg(long = "stats-json", value_name = "PATH")]
    pub stats_json: Option<PathBuf>,

    /// Number of saved samples to print.
    #[arg(long, default_value_t = 5)]
    pub samples: usize,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Number of saved samples to print.
    #[arg(long, default_value_t = 5)]
    pub samples: usize,

    /// Characters shown per message.
    #[arg(long, default_value_t = 80)]
    pub width: usize,
}
