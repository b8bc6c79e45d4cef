//! Chat log to supervised fine-tuning pairs.
//!
//! Stages, strictly in order:
//! 1. Loader — CSV rows into timestamped messages
//! 2. Accumulator — session segmentation and same-sender coalescing
//! 3. Assembler — (user, assistant) pairing, line filtering, counters
//! 4. Report — kept turns, statistics, JSONL output

pub mod accumulator;
pub mod assembler;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod report;

pub use accumulator::Accumulator;
pub use assembler::{TurnAssembler, TurnOutcome};
pub use filter::{CleanedText, LineFilter};
pub use loader::{load_csv, load_csv_file, MessageLog};
pub use pipeline::ConversionPipeline;
pub use report::{preview, write_jsonl, Report, SamplePreview};
