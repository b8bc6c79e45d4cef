use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Speaker role in a training example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Binary role lookup: the configured assistant identity, everyone else is a user.
    pub fn of(sender: &str, assistant_identity: &str) -> Self {
        if sender == assistant_identity {
            Role::Assistant
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One row of the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMessage {
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub text: String,
}

impl RawMessage {
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// A completed (user, assistant) utterance pair, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user: String,
    pub assistant: String,
}

/// A turn that survived filtering. Neither side is blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredTurn {
    pub user_content: String,
    pub assistant_content: String,
}

impl FilteredTurn {
    pub fn to_example(&self) -> TrainingExample {
        TrainingExample {
            messages: vec![
                ChatMessage::new(Role::User, self.user_content.clone()),
                ChatMessage::new(Role::Assistant, self.assistant_content.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// One JSONL record in chat fine-tuning format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub messages: Vec<ChatMessage>,
}

impl TrainingExample {
    /// Serialize to a single JSONL line. Non-ASCII text is written as-is.
    pub fn to_jsonl(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_jsonl(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// True when the roles read `user` then `assistant`.
    pub fn is_well_formed(&self) -> bool {
        matches!(
            self.messages.as_slice(),
            [ChatMessage { role: Role::User, .. }, ChatMessage { role: Role::Assistant, .. }]
        )
    }
}

/// Turn counters. `completely_removed_turns + saved_turns == total_turns`;
/// `partially_filtered_turns` is a subset of `saved_turns`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    pub total_turns: usize,
    pub partially_filtered_turns: usize,
    pub completely_removed_turns: usize,
    pub saved_turns: usize,
}

impl TurnStats {
    pub fn is_consistent(&self) -> bool {
        self.completely_removed_turns + self.saved_turns == self.total_turns
            && self.partially_filtered_turns <= self.saved_turns
    }
}

impl AddAssign for TurnStats {
    fn add_assign(&mut self, rhs: Self) {
        self.total_turns += rhs.total_turns;
        self.partially_filtered_turns += rhs.partially_filtered_turns;
        self.completely_removed_turns += rhs.completely_removed_turns;
        self.saved_turns += rhs.saved_turns;
    }
}
