//! Pipeline and loader configuration.

use crate::error::{Result, SftError};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GAP_THRESHOLD_MINUTES: i64 = 30;

fn default_gap() -> i64 {
    DEFAULT_GAP_THRESHOLD_MINUTES
}

fn s(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Placeholder texts a messenger export writes in place of non-text payloads
/// (map links, images, photos, videos, files, locations, deleted messages, emoticons).
pub fn messenger_placeholders() -> Vec<String> {
    s(&[
        "네이버 지도",
        "이미지",
        "사진",
        "동영상",
        "파일",
        "위치",
        "삭제된 메시지",
        "이모티콘",
    ])
}

/// Resolve a named keyword preset.
pub fn keyword_preset(name: &str) -> Option<Vec<String>> {
    match name {
        "messenger" => Some(messenger_placeholders()),
        _ => None,
    }
}

/// Turn-building configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The one sender mapped to the assistant role. Every other sender is a user.
    pub assistant_identity: String,
    /// Inactivity gap that starts a new session.
    #[serde(default = "default_gap")]
    pub gap_threshold_minutes: i64,
    /// Substrings that remove a line. Empty disables filtering.
    #[serde(default)]
    pub forbidden_keywords: Vec<String>,
}

impl PipelineConfig {
    pub fn new(assistant_identity: impl Into<String>) -> Self {
        Self {
            assistant_identity: assistant_identity.into(),
            gap_threshold_minutes: DEFAULT_GAP_THRESHOLD_MINUTES,
            forbidden_keywords: Vec::new(),
        }
    }

    pub fn with_gap_minutes(mut self, minutes: i64) -> Self {
        self.gap_threshold_minutes = minutes;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.forbidden_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Append keywords, skipping ones already present. Order is preserved.
    pub fn extend_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for kw in keywords {
            let kw = kw.into();
            if !self.forbidden_keywords.contains(&kw) {
                self.forbidden_keywords.push(kw);
            }
        }
    }

    /// Saturates at `Duration::MAX` for values `validate()` rejects.
    pub fn gap_threshold(&self) -> chrono::Duration {
        chrono::Duration::try_minutes(self.gap_threshold_minutes).unwrap_or(chrono::Duration::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.assistant_identity.trim().is_empty() {
            return Err(SftError::Config("assistant_identity must not be empty".into()));
        }
        if self.gap_threshold_minutes < 0 {
            return Err(SftError::Config(format!(
                "gap_threshold_minutes must be >= 0, got {}",
                self.gap_threshold_minutes
            )));
        }
        if chrono::Duration::try_minutes(self.gap_threshold_minutes).is_none() {
            return Err(SftError::Config(format!(
                "gap_threshold_minutes is out of range: {}",
                self.gap_threshold_minutes
            )));
        }
        if self.forbidden_keywords.iter().any(|k| k.is_empty()) {
            // "" is a substring of every line.
            return Err(SftError::Config("forbidden_keywords must not contain an empty string".into()));
        }
        Ok(())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Tabular source options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            has_header: false,
            delimiter: b',',
        }
    }
}
