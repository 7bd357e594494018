//! Inbound events
//!
//! Events arrive one JSON object per line:
//!
//! ```json
//! {"type":"message","channel":"general","author":"u-1","content":"!doc strings"}
//! {"type":"reaction","channel":"general","message":"<id>","user":"u-1","emoji":"➡️"}
//! ```

use docso_core::{CallerId, Handle, Signal};
use serde::{Deserialize, Serialize};

use crate::transport::MessageRef;

/// Reaction for [`Signal::Previous`]
pub const LEFT_ARROW: &str = "⬅️";
/// Reaction for [`Signal::Next`]
pub const RIGHT_ARROW: &str = "➡️";
/// Reaction for [`Signal::Destroy`]
pub const DESTROY_EMOJI: &str = "🗑️";

/// Reactions attached to every listing message, in this order
pub const LISTING_REACTIONS: [&str; 3] = [LEFT_ARROW, RIGHT_ARROW, DESTROY_EMOJI];

/// Navigation signal for a reaction, if it is one of ours
pub fn signal_for(emoji: &str) -> Option<Signal> {
    // clients differ on sending the variation selector
    match emoji.trim_end_matches('\u{fe0f}') {
        "⬅" => Some(Signal::Previous),
        "➡" => Some(Signal::Next),
        "🗑" => Some(Signal::Destroy),
        _ => None,
    }
}

/// An inbound event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Message(MessageEvent),
    Reaction(ReactionEvent),
}

impl Event {
    /// Whether the event was caused by a bot account
    pub fn from_bot(&self) -> bool {
        match self {
            Event::Message(m) => m.bot,
            Event::Reaction(r) => r.bot,
        }
    }
}

/// A chat message that may carry a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub channel: String,
    pub author: CallerId,
    pub content: String,
    #[serde(default)]
    pub bot: bool,
}

/// A reaction added to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub channel: String,
    pub message: Handle,
    pub user: CallerId,
    pub emoji: String,
    #[serde(default)]
    pub bot: bool,
}

impl ReactionEvent {
    pub fn target(&self) -> MessageRef {
        MessageRef {
            channel: self.channel.clone(),
            message: self.message.clone(),
        }
    }
}

/// Parse one inbound line
pub fn parse_line(line: &str) -> serde_json::Result<Event> {
    serde_json::from_str(line)
}
