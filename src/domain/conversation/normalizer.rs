//! History normalizer.
//!
//! Reshapes the widget's history into validated [`Turn`]s. The widget's role
//! vocabulary is kept apart from any provider's; adapters re-tag turns into
//! their own wire format.

use super::turn::{IncomingTurn, Speaker, Turn};

/// Result of normalizing a caller-supplied history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedHistory {
    /// Turns in original order.
    pub turns: Vec<Turn>,
    /// Number of turns whose role tag was not recognized and became `user`.
    pub coerced_roles: usize,
    /// Number of turns dropped because their content was missing or blank.
    pub dropped_turns: usize,
}

impl NormalizedHistory {
    /// Appends the visitor's new message as the final user turn.
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.turns.push(Turn::user(message));
        self
    }

    /// Returns true if any input was coerced or dropped.
    pub fn had_malformed_input(&self) -> bool {
        self.coerced_roles > 0 || self.dropped_turns > 0
    }
}

/// Normalizes the caller's history.
///
/// - order is preserved
/// - `"assistant"` stays assistant, every other tag becomes user
/// - turns with missing or blank content are dropped
pub fn normalize_history(history: &[IncomingTurn]) -> NormalizedHistory {
    let mut normalized = NormalizedHistory {
        turns: Vec::with_capacity(history.len()),
        ..Default::default()
    };

    for entry in history {
        let content = match entry.content.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => {
                normalized.dropped_turns += 1;
                continue;
            }
        };

        let tag = entry.role.as_deref();
        if !Speaker::is_recognized_tag(tag) {
            normalized.coerced_roles += 1;
        }

        normalized.turns.push(Turn {
            speaker: Speaker::from_role_tag(tag),
            content: content.to_string(),
        });
    }

    normalized
}
