//! Shared types, configuration and errors for chat-log to SFT conversion.

pub mod config;
pub mod error;
pub mod timestamp;
pub mod types;

pub use config::{keyword_preset, messenger_placeholders, LoaderConfig, PipelineConfig};
pub use error::{Result, SftError};
pub use types::*;
