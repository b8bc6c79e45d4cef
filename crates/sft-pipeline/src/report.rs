//! Run results, JSONL output and sample previews.

use sft_core::{FilteredTurn, Result, Role, TrainingExample, TurnStats};
use std::fmt;
use std::io::Write;

/// Everything a run produced. Counters are final; nothing is recomputed here.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub turns: Vec<FilteredTurn>,
    pub stats: TurnStats,
    pub keywords: Vec<String>,
    pub sessions: usize,
    pub skipped_rows: usize,
}

impl Report {
    pub fn examples(&self) -> impl Iterator<Item = TrainingExample> + '_ {
        self.turns.iter().map(FilteredTurn::to_example)
    }

    /// Append another independent run. Keywords are kept from `self`.
    pub fn merge(&mut self, other: Report) {
        self.turns.extend(other.turns);
        self.stats += other.stats;
        self.sessions += other.sessions;
        self.skipped_rows += other.skipped_rows;
        if self.keywords.is_empty() {
            self.keywords = other.keywords;
        }
    }

    pub fn write_jsonl<W: Write>(&self, writer: W) -> Result<usize> {
        write_jsonl(writer, &self.turns)
    }

    pub fn summary(&self) -> String {
        let s = &self.stats;
        let mut out = format!(
            "Turns formed: {}\n\
             \x20 partially filtered: {} (some lines removed)\n\
             \x20 fully removed: {} (a side was emptied by filtering)\n\
             \x20 saved: {}\n\
             Sessions: {}\n\
             Skipped rows: {}\n",
            s.total_turns,
            s.partially_filtered_turns,
            s.completely_removed_turns,
            s.saved_turns,
            self.sessions,
            self.skipped_rows,
        );
        if !self.keywords.is_empty() {
            out += &format!("Forbidden keywords ({}):\n", self.keywords.len());
            for kw in &self.keywords {
                out += &format!("  - '{}'\n", kw);
            }
        }
        out
    }
}

/// Write one `{"messages":[...]}` object per line. Returns the number of lines.
pub fn write_jsonl<W: Write>(mut writer: W, turns: &[FilteredTurn]) -> Result<usize> {
    for turn in turns {
        serde_json::to_writer(&mut writer, &turn.to_example())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(turns.len())
}

/// Single-line view of one saved example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePreview {
    pub index: usize,
    pub lines: Vec<(Role, String)>,
    pub well_formed: bool,
}

impl fmt::Display for SamplePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[sample {}]", self.index)?;
        for (role, text) in &self.lines {
            writeln!(f, "  {:<10}: {}", role.to_string(), text)?;
        }
        let mark = if self.well_formed { "ok" } else { "BAD" };
        let order = self
            .lines
            .iter()
            .map(|(r, _)| r.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(f, "  [{}] {}", mark, order)
    }
}

fn flatten(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect::<String>().replace('\n', " ");
    if text.chars().count() > width {
        out.push_str("...");
    }
    out
}

/// First `n` saved examples, newlines flattened and truncated to `width` chars.
pub fn preview(turns: &[FilteredTurn], n: usize, width: usize) -> Vec<SamplePreview> {
    turns
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, turn)| {
            let example = turn.to_example();
            SamplePreview {
                index: i + 1,
                lines: example
                    .messages
                    .iter()
                    .map(|m| (m.role, flatten(&m.content, width)))
                    .collect(),
                well_formed: example.is_well_formed(),
            }
        })
        .collect()
}
