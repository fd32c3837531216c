//! Append-only conversation transcript.
//!
//! Turns are kept as records and only flattened to `"User: ..."` /
//! `"AI: ..."` text when the oracle needs them as context or when the
//! hand-off body is assembled.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label used when the transcript is rendered as text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "AI",
        }
    }
}

/// A single recorded turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: Timestamp,
}

impl Turn {
    /// Renders the turn as one transcript line.
    pub fn render(&self) -> String {
        format!("{}: {}", self.speaker.label(), self.text)
    }
}

/// Ordered log of every user and assistant turn in a session.
///
/// There is no way to remove or reorder turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one turn at the end of the log.
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push(Turn {
            speaker,
            text: text.into(),
            at: Timestamp::now(),
        });
    }

    /// Records a user message followed by the reply it received.
    pub fn record_exchange(&mut self, user_text: impl Into<String>, reply: impl Into<String>) {
        self.append(Speaker::User, user_text);
        self.append(Speaker::Assistant, reply);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Flattens the log into newline-separated `"{role}: {text}"` lines.
    pub fn render(&self) -> String {
        self.turns
            .iter()
            .map(Turn::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
