//! Turn filtering and counting.

use crate::filter::LineFilter;
use crate::report::Report;
use sft_core::{FilteredTurn, Turn, TurnStats};
use tracing::debug;

/// What happened to a candidate turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Kept. `partial` is set when at least one line was removed.
    Saved { partial: bool },
    /// A side was emptied by filtering; the whole turn is dropped.
    Removed,
}

#[derive(Debug, Clone, Default)]
pub struct TurnAssembler {
    filter: LineFilter,
    stats: TurnStats,
    kept: Vec<FilteredTurn>,
}

impl TurnAssembler {
    pub fn new(filter: LineFilter) -> Self {
        Self {
            filter,
            stats: TurnStats::default(),
            kept: Vec::new(),
        }
    }

    pub fn accept(&mut self, turn: Turn) -> TurnOutcome {
        self.stats.total_turns += 1;

        let user = self.filter.clean(&turn.user);
        let assistant = self.filter.clean(&turn.assistant);

        if user.is_empty || assistant.is_empty {
            self.stats.completely_removed_turns += 1;
            debug!(
                turn = self.stats.total_turns,
                user_empty = user.is_empty,
                assistant_empty = assistant.is_empty,
                "turn removed by filter"
            );
            return TurnOutcome::Removed;
        }

        let partial = user.content != turn.user || assistant.content != turn.assistant;
        if partial {
            self.stats.partially_filtered_turns += 1;
        }
        self.kept.push(FilteredTurn {
            user_content: user.content,
            assistant_content: assistant.content,
        });
        self.stats.saved_turns += 1;
        TurnOutcome::Saved { partial }
    }

    pub fn stats(&self) -> &TurnStats {
        &self.stats
    }

    pub fn kept(&self) -> &[FilteredTurn] {
        &self.kept
    }

    pub fn into_report(self) -> Report {
        Report {
            turns: self.kept,
            stats: self.stats,
            keywords: self.filter.keywords().to_vec(),
            sessions: 0,
            skipped_rows: 0,
        }
    }
}
