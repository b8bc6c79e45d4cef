//! Session segmentation and same-sender coalescing.
//!
//! Consecutive messages from one sender are buffered into a single utterance. The
//! buffer is flushed into the pending slot for the sender's role when the sender
//! changes, when the session ends, or at end of input. A turn is released as soon as
//! both slots are filled. A gap longer than the threshold ends the session: the
//! buffer is flushed first (so a pair completed by that flush is still released) and
//! then every pending slot is discarded.

use chrono::{Duration, NaiveDateTime};
use sft_core::{PipelineConfig, RawMessage, Role, Turn};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Accumulator {
    assistant_identity: String,
    gap_threshold: Duration,
    last_sender: Option<String>,
    last_time: Option<NaiveDateTime>,
    buffer: Vec<String>,
    pending_user: Option<String>,
    pending_assistant: Option<String>,
    sessions: usize,
}

impl Accumulator {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            assistant_identity: config.assistant_identity.clone(),
            gap_threshold: config.gap_threshold(),
            last_sender: None,
            last_time: None,
            buffer: Vec::new(),
            pending_user: None,
            pending_assistant: None,
            sessions: 0,
        }
    }

    /// Feed the next message. Returns a turn if this message completed one.
    ///
    /// Input must be in ascending timestamp order. An earlier timestamp yields a
    /// negative gap, which never starts a new session.
    pub fn push(&mut self, msg: RawMessage) -> Option<Turn> {
        let mut completed = None;

        match self.last_time {
            None => self.sessions = 1,
            Some(last) if msg.timestamp - last > self.gap_threshold => {
                debug!(
                    gap_minutes = (msg.timestamp - last).num_minutes(),
                    session = self.sessions + 1,
                    "session boundary"
                );
                completed = self.flush();
                self.reset();
                self.sessions += 1;
            }
            Some(_) => {}
        }

        if self.last_sender.as_deref() == Some(msg.sender.as_str()) {
            self.buffer.push(msg.text);
        } else {
            // The buffer is empty after a boundary, so at most one turn per message.
            if let Some(turn) = self.flush() {
                completed = Some(turn);
            }
            self.buffer.push(msg.text);
            self.last_sender = Some(msg.sender);
        }

        self.last_time = Some(msg.timestamp);
        completed
    }

    /// Move the buffered utterance into its role's pending slot, overwriting any
    /// previous value there. Returns the pair if both slots are now filled.
    pub fn flush(&mut self) -> Option<Turn> {
        if self.buffer.is_empty() {
            return None;
        }
        let utterance = std::mem::take(&mut self.buffer).join("\n");
        let role = match self.last_sender.as_deref() {
            Some(sender) => Role::of(sender, &self.assistant_identity),
            None => Role::User,
        };
        match role {
            Role::User => self.pending_user = Some(utterance),
            Role::Assistant => self.pending_assistant = Some(utterance),
        }

        match (self.pending_user.take(), self.pending_assistant.take()) {
            (Some(user), Some(assistant)) => Some(Turn { user, assistant }),
            (user, assistant) => {
                self.pending_user = user;
                self.pending_assistant = assistant;
                None
            }
        }
    }

    /// Clear per-session state. The buffer is dropped, not flushed.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.pending_user = None;
        self.pending_assistant = None;
        self.last_sender = None;
    }

    /// End of input: flush the final utterance. A dangling half-pair is dropped.
    pub fn finish(&mut self) -> Option<Turn> {
        let turn = self.flush();
        if self.pending_user.is_some() || self.pending_assistant.is_some() {
            debug!("discarding unpaired utterance at end of input");
        }
        self.reset();
        turn
    }

    pub fn last_sender(&self) -> Option<&str> {
        self.last_sender.as_deref()
    }

    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.last_time
    }

    pub fn buffered(&self) -> &[String] {
        &self.buffer
    }

    pub fn pending_user(&self) -> Option<&str> {
        self.pending_user.as_deref()
    }

    pub fn pending_assistant(&self) -> Option<&str> {
        self.pending_assistant.as_deref()
    }

    /// Sessions seen so far.
    pub fn session_count(&self) -> usize {
        self.sessions
    }
}
