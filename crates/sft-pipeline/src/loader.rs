//! CSV message log loading.
//!
//! Rows are `timestamp,sender,text` with no header unless configured. A row with a
//! missing or empty cell is skipped. A present but unparseable timestamp fails the load.

use sft_core::timestamp::parse_timestamp;
use sft_core::{LoaderConfig, RawMessage, Result, SftError};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Messages in file order plus the number of rows dropped for missing cells.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    pub messages: Vec<RawMessage>,
    pub skipped_rows: usize,
}

impl MessageLog {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn cell<'a>(record: &'a csv::StringRecord, idx: usize) -> Option<&'a str> {
    record.get(idx).filter(|v| !v.is_empty())
}

/// Convert one record. `Ok(None)` means the row is incomplete and skipped.
pub fn parse_record(row: usize, record: &csv::StringRecord) -> Result<Option<RawMessage>> {
    let (Some(ts), Some(sender), Some(text)) = (cell(record, 0), cell(record, 1), cell(record, 2))
    else {
        return Ok(None);
    };
    let timestamp = parse_timestamp(ts).ok_or_else(|| SftError::InvalidTimestamp {
        row,
        value: ts.to_string(),
    })?;
    Ok(Some(RawMessage::new(timestamp, sender, text)))
}

pub fn load_csv<R: Read>(reader: R, config: &LoaderConfig) -> Result<MessageLog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(config.has_header)
        .delimiter(config.delimiter)
        .flexible(true)
        .from_reader(reader);

    let mut log = MessageLog::default();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 1);
        match parse_record(row, &record)? {
            Some(msg) => log.messages.push(msg),
            None => {
                debug!(row, "skipping incomplete row");
                log.skipped_rows += 1;
            }
        }
    }
    if log.skipped_rows > 0 {
        warn!(skipped = log.skipped_rows, "rows with missing fields were skipped");
    }
    Ok(log)
}

pub fn load_csv_file(path: impl AsRef<Path>, config: &LoaderConfig) -> Result<MessageLog> {
    let file = std::fs::File::open(path.as_ref())?;
    load_csv(std::io::BufReader::new(file), config)
}
