//! The transcript: the full ordered message history of a session.

use super::Message;

/// Ordered, append-only sequence of messages.
///
/// Grows monotonically for the life of the session; insertion order is
/// preserved and nothing is ever reordered or deduplicated.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message, preserving insertion order.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if no messages have been appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn push_appends_in_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::customer("first").unwrap());
        transcript.push(Message::agent("second").unwrap());

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0].text(), "first");
        assert_eq!(transcript.messages()[1].text(), "second");
        assert_eq!(transcript.last().unwrap().text(), "second");
    }

    #[test]
    fn new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.last().is_none());
    }

    proptest! {
        #[test]
        fn append_preserves_prior_order(texts in proptest::collection::vec("[a-z]{1,12}", 1..20)) {
            let mut transcript = Transcript::new();
            for text in &texts {
                transcript.push(Message::agent(text.clone()).unwrap());
            }

            prop_assert_eq!(transcript.len(), texts.len());
            for (msg, text) in transcript.messages().iter().zip(&texts) {
                prop_assert_eq!(msg.text(), text.as_str());
            }
        }
    }
}
