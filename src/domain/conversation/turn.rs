//! Conversation turns.
//!
//! A turn is one message exchanged between the site visitor and the
//! assistant. The client owns the conversation and resends every turn on
//! each request, so turns carry no identity and are never stored.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// Site visitor.
    User,
    /// The assistant (model) reply.
    Assistant,
}

impl Speaker {
    /// Maps a caller-supplied role tag onto a speaker.
    ///
    /// Only the exact tag `"assistant"` maps to [`Speaker::Assistant`];
    /// everything else, including a missing tag, is treated as the user.
    pub fn from_role_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("assistant") => Speaker::Assistant,
            _ => Speaker::User,
        }
    }

    /// Returns true if `tag` is one of the two recognized role tags.
    pub fn is_recognized_tag(tag: Option<&str>) -> bool {
        matches!(tag, Some("assistant") | Some("user"))
    }

    /// Wire name of the speaker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated turn.
///
/// # Invariants
///
/// - `content` is non-blank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the turn.
    pub speaker: Speaker,
    /// Message text.
    pub content: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            content: content.into(),
        }
    }
}

/// A turn exactly as the chat widget sent it.
///
/// Both members are optional so that a sloppy client degrades into
/// coercion instead of rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingTurn {
    /// Role tag, expected to be `"user"` or `"assistant"`.
    #[serde(default)]
    pub role: Option<String>,
    /// Message text.
    #[serde(default)]
    pub content: Option<String>,
}

impl IncomingTurn {
    /// Creates an incoming turn from a role tag and content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            content: Some(content.into()),
        }
    }
}
