use thiserror::Error;

#[derive(Error, Debug)]
pub enum SftError {
    #[error("Invalid timestamp at row {row}: {value:?}")]
    InvalidTimestamp { row: usize, value: String },
    #[error("Invalid config: {0}")]
    Config(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SftError>;
