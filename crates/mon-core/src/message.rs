use std::sync::{Mutex, PoisonError};

use crate::entity::ActorId;
use crate::location::LocationId;

/// A piece of narration bound for one actor or a whole room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Text shown to a single actor.
    Notify {
        /// Recipient.
        to: ActorId,
        /// What they see.
        text: String,
    },
    /// Text shown to everyone in a room except the listed actors.
    Broadcast {
        /// Room the text is spoken into.
        location: LocationId,
        /// What the room sees.
        text: String,
        /// Occupants who do not receive it.
        exclude: Vec<ActorId>,
    },
}

impl Message {
    /// The narration text.
    pub fn text(&self) -> &str {
        match self {
            Self::Notify { text, .. } | Self::Broadcast { text, .. } => text,
        }
    }
}

/// Delivers narration to connected sessions.
///
/// Delivery is fire-and-forget: implementations swallow their own failures
/// and never report them to the rules that produced the text.
pub trait Messenger {
    /// Send text to a single actor.
    fn notify(&self, to: ActorId, text: &str);

    /// Send text to every occupant of a location except `exclude`.
    fn broadcast(&self, location: LocationId, text: &str, exclude: &[ActorId]);

    /// Flush a buffered outbox in order.
    fn deliver(&self, outbox: Outbox) {
        for message in outbox.messages {
            match message {
                Message::Notify { to, text } => self.notify(to, &text),
                Message::Broadcast {
                    location,
                    text,
                    exclude,
                } => self.broadcast(location, &text, &exclude),
            }
        }
    }
}

impl<M: Messenger + ?Sized> Messenger for &M {
    fn notify(&self, to: ActorId, text: &str) {
        (**self).notify(to, text);
    }

    fn broadcast(&self, location: LocationId, text: &str, exclude: &[ActorId]) {
        (**self).broadcast(location, text, exclude);
    }
}

/// Narration collected while a location is locked, sent once it is released.
#[derive(Debug, Default)]
pub struct Outbox {
    messages: Vec<Message>,
}

impl Outbox {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue text for a single actor.
    pub fn notify(&mut self, to: ActorId, text: impl Into<String>) {
        self.messages.push(Message::Notify {
            to,
            text: text.into(),
        });
    }

    /// Queue text for a room, skipping the listed actors.
    pub fn broadcast(&mut self, location: LocationId, text: impl Into<String>, exclude: &[ActorId]) {
        self.messages.push(Message::Broadcast {
            location,
            text: text.into(),
            exclude: exclude.to_vec(),
        });
    }

    /// Queued messages in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of queued messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// In-memory messenger that records every delivery.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Mutex<Vec<Message>>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order.
    pub fn entries(&self) -> Vec<Message> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Texts sent directly to an actor.
    pub fn notices_for(&self, actor: ActorId) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|m| match m {
                Message::Notify { to, text } if to == actor => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Broadcasts spoken into a location, with their exclusion lists.
    pub fn broadcasts_in(&self, location: LocationId) -> Vec<(String, Vec<ActorId>)> {
        self.entries()
            .into_iter()
            .filter_map(|m| match m {
                Message::Broadcast {
                    location: at,
                    text,
                    exclude,
                } if at == location => Some((text, exclude)),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded deliveries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been delivered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn record(&self, message: Message) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

impl Messenger for MessageLog {
    fn notify(&self, to: ActorId, text: &str) {
        self.record(Message::Notify {
            to,
            text: text.to_string(),
        });
    }

    fn broadcast(&self, location: LocationId, text: &str, exclude: &[ActorId]) {
        self.record(Message::Broadcast {
            location,
            text: text.to_string(),
            exclude: exclude.to_vec(),
        });
    }
}
