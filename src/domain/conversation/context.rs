//! The context: the client-authored subset of the transcript submitted
//! for analysis.

use super::Message;

/// Ordered accumulation of client-authored messages.
///
/// # Invariants
///
/// - Mirrors the client-authored subset of the transcript in append order:
///   no reordering, no deduplication.
/// - Service-originated messages never enter the context.
#[derive(Debug, Clone, Default)]
pub struct Context {
    messages: Vec<Message>,
}

impl Context {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a client-authored message.
    ///
    /// Callers are responsible for filtering out service messages; the
    /// session aggregate is the only writer.
    pub fn push(&mut self, message: Message) {
        debug_assert!(message.sender().is_client_authored());
        self.messages.push(message);
    }

    /// Returns the messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of accumulated messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
