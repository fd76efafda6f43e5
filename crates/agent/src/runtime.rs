use tracing::{info, warn};

use frontdesk_core::{ConversationEvent, IntakeRecord};

use crate::completion::CompletionDetector;
use crate::extract;

/// Watches the event stream for a finished intake. Detection and extraction
/// run in-line on the event path; extraction failure is logged and swallowed
/// so the conversation keeps going until the next qualifying utterance.
#[derive(Clone, Debug, Default)]
pub struct IntakeRuntime {
    detector: CompletionDetector,
}

impl IntakeRuntime {
    pub fn new(detector: CompletionDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &CompletionDetector {
        &self.detector
    }

    /// Returns the extracted record when `event` completes the intake.
    pub fn observe(&self, event: &ConversationEvent) -> Option<IntakeRecord> {
        let sentinel = self.detector.matched_sentinel(event)?;

        match extract::extract(&event.text_content) {
            Ok(record) => {
                info!(
                    event_name = "frontdesk.intake.completed",
                    sentinel,
                    field_count = record.len(),
                    "intake completed and payload extracted"
                );
                Some(record)
            }
            Err(error) => {
                warn!(
                    event_name = "frontdesk.intake.extraction_failed",
                    sentinel,
                    class = error.class(),
                    error = %error,
                    "completion sentinel seen but payload did not extract"
                );
                None
            }
        }
    }
}
