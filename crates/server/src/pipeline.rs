use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use frontdesk_agent::IntakeRuntime;
use frontdesk_core::ConversationEvent;
use frontdesk_notify::{DispatchOutcome, IntakeDispatcher};
use frontdesk_voice::{AssistantTurnService, EventHandlerError, HandlerResult, SessionContext};

/// The completion path, wired end to end: every assistant turn runs through
/// the detector and extractor, and a qualifying turn hands its record to the
/// dispatcher. Extraction failures were already logged and swallowed by the
/// runtime; contract violations and dispatch outcomes are logged here. The
/// caller never hears about any of it - by the time a record exists, the
/// conversation is over.
pub struct IntakePipeline {
    runtime: IntakeRuntime,
    dispatcher: Arc<IntakeDispatcher>,
}

impl IntakePipeline {
    pub fn new(runtime: IntakeRuntime, dispatcher: Arc<IntakeDispatcher>) -> Self {
        Self { runtime, dispatcher }
    }
}

#[async_trait]
impl AssistantTurnService for IntakePipeline {
    async fn handle_assistant_turn(
        &self,
        event: &ConversationEvent,
        ctx: &SessionContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        let Some(record) = self.runtime.observe(event) else {
            return Ok(HandlerResult::Processed);
        };

        match self.dispatcher.dispatch(&record).await {
            Ok(DispatchOutcome::Dispatched(report)) => {
                info!(
                    event_name = "frontdesk.pipeline.dispatched",
                    session_id = %ctx.session_id,
                    clean = report.all_succeeded(),
                    "completed intake dispatched"
                );
                Ok(HandlerResult::Completed)
            }
            Ok(DispatchOutcome::AlreadyDispatched) => {
                info!(
                    event_name = "frontdesk.pipeline.duplicate_completion",
                    session_id = %ctx.session_id,
                    "session already dispatched; ignoring repeat completion"
                );
                Ok(HandlerResult::Processed)
            }
            Err(error) => {
                warn!(
                    event_name = "frontdesk.pipeline.record_rejected",
                    session_id = %ctx.session_id,
                    error = %error,
                    "extracted record violates the field policy; awaiting a corrected summary"
                );
                Ok(HandlerResult::Processed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use frontdesk_agent::{CompletionDetector, IntakeRuntime};
    use frontdesk_core::{ConversationEvent, FieldPolicy, IntakeRecord};
    use frontdesk_notify::{IntakeDispatcher, Mailer, NotifyError};
    use frontdesk_voice::{AssistantTurnService, HandlerResult, SessionContext};

    use super::IntakePipeline;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send_summary(&self, record: &IntakeRecord) -> Result<(), NotifyError> {
            self.sent.lock().await.push(frontdesk_notify::summary_text(record));
            Ok(())
        }
    }

    fn pipeline_with(mailer: Arc<RecordingMailer>) -> IntakePipeline {
        let dispatcher =
            Arc::new(IntakeDispatcher::new(Some(mailer), None, FieldPolicy::appointment()));
        IntakePipeline::new(IntakeRuntime::new(CompletionDetector::default()), dispatcher)
    }

    fn completed_event() -> ConversationEvent {
        ConversationEvent::assistant(concat!(
            "Thank you for calling. Your appointment has been scheduled. ",
            "{\"patient_name\":\"Jane Doe\",\"doctor_name\":\"Dr. Mark Patel\",",
            "\"appointment_time\":\"Tuesday 1PM\"}"
        ))
    }

    #[tokio::test]
    async fn qualifying_turn_dispatches_once_with_the_key_fields() {
        let mailer = Arc::new(RecordingMailer::default());
        let pipeline = pipeline_with(mailer.clone());

        let result = pipeline
            .handle_assistant_turn(&completed_event(), &SessionContext::new())
            .await
            .expect("turn handled");

        assert_eq!(result, HandlerResult::Completed);
        let sent = mailer.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Jane Doe"));
        assert!(sent[0].contains("Dr. Mark Patel"));
        assert!(sent[0].contains("Tuesday 1PM"));
    }

    #[tokio::test]
    async fn repeat_completion_in_the_same_session_sends_nothing() {
        let mailer = Arc::new(RecordingMailer::default());
        let pipeline = pipeline_with(mailer.clone());
        let ctx = SessionContext::new();

        let first = pipeline.handle_assistant_turn(&completed_event(), &ctx).await.expect("first");
        let second =
            pipeline.handle_assistant_turn(&completed_event(), &ctx).await.expect("second");

        assert_eq!(first, HandlerResult::Completed);
        assert_eq!(second, HandlerResult::Processed);
        assert_eq!(mailer.sent.lock().await.len(), 1, "at most one email per session");
    }

    #[tokio::test]
    async fn ordinary_turns_pass_through_without_effects() {
        let mailer = Arc::new(RecordingMailer::default());
        let pipeline = pipeline_with(mailer.clone());

        let result = pipeline
            .handle_assistant_turn(
                &ConversationEvent::assistant("Could I get your insurance payer?"),
                &SessionContext::new(),
            )
            .await
            .expect("turn handled");

        assert_eq!(result, HandlerResult::Processed);
        assert!(mailer.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn sentinel_without_payload_keeps_the_session_open() {
        let mailer = Arc::new(RecordingMailer::default());
        let pipeline = pipeline_with(mailer.clone());
        let ctx = SessionContext::new();

        let bare = ConversationEvent::assistant("Your appointment has been scheduled. Goodbye!");
        let result = pipeline.handle_assistant_turn(&bare, &ctx).await.expect("turn handled");
        assert_eq!(result, HandlerResult::Processed);

        // A later well-formed completion still dispatches.
        let result =
            pipeline.handle_assistant_turn(&completed_event(), &ctx).await.expect("turn handled");
        assert_eq!(result, HandlerResult::Completed);
        assert_eq!(mailer.sent.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn policy_violating_record_is_rejected_but_not_fatal() {
        let mailer = Arc::new(RecordingMailer::default());
        let pipeline = pipeline_with(mailer.clone());
        let ctx = SessionContext::new();

        let partial = ConversationEvent::assistant(
            "Your appointment has been scheduled. {\"patient_name\":\"Jane Doe\"}",
        );
        let result = pipeline.handle_assistant_turn(&partial, &ctx).await.expect("turn handled");
        assert_eq!(result, HandlerResult::Processed);
        assert!(mailer.sent.lock().await.is_empty());

        let result =
            pipeline.handle_assistant_turn(&completed_event(), &ctx).await.expect("turn handled");
        assert_eq!(result, HandlerResult::Completed, "session was not consumed by the rejection");
    }
}
