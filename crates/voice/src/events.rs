use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use frontdesk_core::{ConversationEvent, Role};

/// Correlation data shared by every handler invocation within one session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: String,
}

impl SessionContext {
    pub fn new() -> Self {
        Self { session_id: Uuid::new_v4().to_string() }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandlerResult {
    /// The event completed the intake; downstream effects were attempted.
    Completed,
    /// The event was examined and consumed without completing anything.
    Processed,
    /// No handler is registered for the event's role.
    Ignored,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventHandlerError {
    #[error("assistant turn handler failure: {0}")]
    AssistantTurn(String),
    #[error("user turn handler failure: {0}")]
    UserTurn(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Handler(#[from] EventHandlerError),
}

/// One registered subscriber for a single turn author. The runtime ignores
/// handler return values; they exist for the session runner's logging and
/// for tests.
#[async_trait]
pub trait EventHandler: Send + Sync {
    fn role(&self) -> Role;
    async fn handle(
        &self,
        event: &ConversationEvent,
        ctx: &SessionContext,
    ) -> Result<HandlerResult, EventHandlerError>;
}

/// Routes each conversation event to the handler registered for its role.
/// Built once per session and torn down with it.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<Role, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H>(&mut self, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.handlers.insert(handler.role(), Arc::new(handler));
    }

    pub async fn dispatch(
        &self,
        event: &ConversationEvent,
        ctx: &SessionContext,
    ) -> Result<HandlerResult, DispatchError> {
        let Some(handler) = self.handlers.get(&event.role) else {
            return Ok(HandlerResult::Ignored);
        };

        handler.handle(event, ctx).await.map_err(DispatchError::from)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

/// Dispatcher with the assistant turn path wired to a no-op service. The
/// server replaces the service with the real intake pipeline at bootstrap.
pub fn default_dispatcher() -> EventDispatcher {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(AssistantTurnHandler::new(NoopAssistantTurnService));
    dispatcher
}

/// Service seam for assistant utterances: completion detection, extraction,
/// and dispatch live behind this trait so the voice crate never depends on
/// the agent or the side-effect stack.
#[async_trait]
pub trait AssistantTurnService: Send + Sync {
    async fn handle_assistant_turn(
        &self,
        event: &ConversationEvent,
        ctx: &SessionContext,
    ) -> Result<HandlerResult, EventHandlerError>;
}

pub struct AssistantTurnHandler<S> {
    service: S,
}

impl<S> AssistantTurnHandler<S>
where
    S: AssistantTurnService,
{
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S> EventHandler for AssistantTurnHandler<S>
where
    S: AssistantTurnService + 'static,
{
    fn role(&self) -> Role {
        Role::Assistant
    }

    async fn handle(
        &self,
        event: &ConversationEvent,
        ctx: &SessionContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        if event.role != Role::Assistant {
            return Ok(HandlerResult::Ignored);
        }

        self.service.handle_assistant_turn(event, ctx).await
    }
}

#[derive(Default)]
pub struct NoopAssistantTurnService;

#[async_trait]
impl AssistantTurnService for NoopAssistantTurnService {
    async fn handle_assistant_turn(
        &self,
        _event: &ConversationEvent,
        _ctx: &SessionContext,
    ) -> Result<HandlerResult, EventHandlerError> {
        Ok(HandlerResult::Processed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use frontdesk_core::{ConversationEvent, Role};

    use super::{
        default_dispatcher, AssistantTurnHandler, AssistantTurnService, EventDispatcher,
        EventHandler, EventHandlerError, HandlerResult, SessionContext,
    };

    struct CountingService {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AssistantTurnService for CountingService {
        async fn handle_assistant_turn(
            &self,
            _event: &ConversationEvent,
            _ctx: &SessionContext,
        ) -> Result<HandlerResult, EventHandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerResult::Completed)
        }
    }

    #[tokio::test]
    async fn dispatcher_routes_assistant_turns_to_the_service() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(AssistantTurnHandler::new(CountingService { calls: calls.clone() }));

        let result = dispatcher
            .dispatch(
                &ConversationEvent::assistant("Your appointment has been scheduled."),
                &SessionContext::new(),
            )
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Completed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn user_turns_never_reach_the_assistant_service() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(AssistantTurnHandler::new(CountingService { calls: calls.clone() }));

        let result = dispatcher
            .dispatch(
                &ConversationEvent::user("Your appointment has been scheduled, right?"),
                &SessionContext::new(),
            )
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Ignored);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_dispatcher_ignores_everything() {
        let dispatcher = EventDispatcher::new();

        let result = dispatcher
            .dispatch(&ConversationEvent::assistant("hello"), &SessionContext::new())
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Ignored);
        assert_eq!(dispatcher.handler_count(), 0);
    }

    #[tokio::test]
    async fn default_dispatcher_processes_assistant_turns() {
        let dispatcher = default_dispatcher();
        assert_eq!(dispatcher.handler_count(), 1);

        let result = dispatcher
            .dispatch(&ConversationEvent::assistant("Could I get your name?"), &SessionContext::new())
            .await
            .expect("dispatch");

        assert_eq!(result, HandlerResult::Processed);
    }

    #[test]
    fn handler_registration_is_keyed_by_role() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(AssistantTurnHandler::new(super::NoopAssistantTurnService));
        dispatcher.register(AssistantTurnHandler::new(super::NoopAssistantTurnService));

        assert_eq!(dispatcher.handler_count(), 1);
    }

    #[test]
    fn handler_role_is_assistant() {
        let handler = AssistantTurnHandler::new(super::NoopAssistantTurnService);
        assert_eq!(handler.role(), Role::Assistant);
    }

    #[test]
    fn session_contexts_get_distinct_ids() {
        assert_ne!(SessionContext::new().session_id, SessionContext::new().session_id);
    }
}
