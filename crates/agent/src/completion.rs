use frontdesk_core::{ConversationEvent, Role, DEFAULT_SENTINELS};

/// Decides whether a conversation event marks the end of an intake.
///
/// Matching is plain case-sensitive substring containment against a small
/// sentinel set, nothing smarter: the operating script instructs the model
/// to emit a sentinel verbatim, and we hold it to that. Only assistant
/// turns are ever considered.
#[derive(Clone, Debug)]
pub struct CompletionDetector {
    sentinels: Vec<String>,
}

impl Default for CompletionDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect())
    }
}

impl CompletionDetector {
    pub fn new(sentinels: Vec<String>) -> Self {
        Self { sentinels }
    }

    pub fn sentinels(&self) -> &[String] {
        &self.sentinels
    }

    /// Returns the sentinel that fired, or `None` when the event does not
    /// complete the intake.
    pub fn matched_sentinel(&self, event: &ConversationEvent) -> Option<&str> {
        if event.role != Role::Assistant {
            return None;
        }
        self.sentinels
            .iter()
            .find(|sentinel| event.text_content.contains(sentinel.as_str()))
            .map(String::as_str)
    }
}
