use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use frontdesk_core::{ConversationEvent, DEFAULT_GREETING};

use crate::events::{default_dispatcher, DispatchError, EventDispatcher, SessionContext};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("transport failed to connect: {0}")]
    Connect(String),
    #[error("transport read failed: {0}")]
    Receive(String),
    #[error("transport speak failed: {0}")]
    Say(String),
    #[error("transport disconnect failed: {0}")]
    Disconnect(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// The external voice runtime, reduced to the two interfaces this system
/// consumes: the event subscription (`next_event`) and reply generation
/// (`say`). Everything acoustic happens behind it.
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    async fn connect(&self) -> Result<(), TransportError>;
    /// Next conversation event, or `None` once the session stream has ended.
    async fn next_event(&self) -> Result<Option<ConversationEvent>, TransportError>;
    /// Ask the runtime to produce and speak one assistant line.
    async fn say(&self, line: &str) -> Result<(), TransportError>;
    async fn disconnect(&self) -> Result<(), TransportError>;
}

#[derive(Default)]
pub struct NoopVoiceTransport;

#[async_trait]
impl VoiceTransport for NoopVoiceTransport {
    async fn connect(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn next_event(&self) -> Result<Option<ConversationEvent>, TransportError> {
        Ok(None)
    }

    async fn say(&self, _line: &str) -> Result<(), TransportError> {
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Owns one conversation session: connects the transport, speaks the
/// greeting, then pumps events one at a time through the dispatcher until
/// the stream ends. Events are strictly sequential; handler failures are
/// logged and the pump continues, but a transport failure ends the session -
/// this core retries nothing.
pub struct SessionRunner {
    transport: Arc<dyn VoiceTransport>,
    dispatcher: EventDispatcher,
    greeting: String,
    noop_transport: bool,
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self {
            transport: Arc::new(NoopVoiceTransport),
            dispatcher: default_dispatcher(),
            greeting: DEFAULT_GREETING.to_string(),
            noop_transport: true,
        }
    }
}

impl SessionRunner {
    pub fn new(
        transport: Arc<dyn VoiceTransport>,
        dispatcher: EventDispatcher,
        greeting: String,
    ) -> Self {
        Self { transport, dispatcher, greeting, noop_transport: false }
    }

    /// Runner without a wired runtime transport: connects, exits idle.
    pub fn idle(dispatcher: EventDispatcher, greeting: String) -> Self {
        Self { transport: Arc::new(NoopVoiceTransport), dispatcher, greeting, noop_transport: true }
    }

    pub fn is_noop_transport(&self) -> bool {
        self.noop_transport
    }

    pub async fn run(&self) -> Result<(), SessionError> {
        let ctx = SessionContext::new();

        info!(
            event_name = "frontdesk.session.start",
            session_id = %ctx.session_id,
            "opening voice session"
        );
        self.transport.connect().await?;

        if !self.greeting.is_empty() {
            if let Err(error) = self.transport.say(&self.greeting).await {
                return Err(self.abort_session(&ctx, error).await);
            }
            debug!(
                event_name = "frontdesk.session.greeted",
                session_id = %ctx.session_id,
                "greeting spoken"
            );
        }

        loop {
            let next = match self.transport.next_event().await {
                Ok(next) => next,
                Err(error) => return Err(self.abort_session(&ctx, error).await),
            };
            let Some(event) = next else {
                self.transport.disconnect().await?;
                info!(
                    event_name = "frontdesk.session.end",
                    session_id = %ctx.session_id,
                    "voice session stream closed"
                );
                return Ok(());
            };

            debug!(
                event_name = "frontdesk.session.event_received",
                session_id = %ctx.session_id,
                role = event.role.as_str(),
                "received conversation event"
            );

            match self.dispatcher.dispatch(&event, &ctx).await {
                Ok(result) => {
                    debug!(
                        event_name = "frontdesk.session.event_handled",
                        session_id = %ctx.session_id,
                        role = event.role.as_str(),
                        result = ?result,
                        "conversation event handled"
                    );
                }
                Err(error) => {
                    warn!(
                        event_name = "frontdesk.session.event_failed",
                        session_id = %ctx.session_id,
                        role = event.role.as_str(),
                        error = %error,
                        "event handling failed; continuing session"
                    );
                }
            }
        }
    }

    /// Transport failure after connect: the session is over, but the
    /// transport side still gets told. The disconnect is best-effort; the
    /// original failure is what callers see.
    async fn abort_session(&self, ctx: &SessionContext, error: TransportError) -> SessionError {
        warn!(
            event_name = "frontdesk.session.aborted",
            session_id = %ctx.session_id,
            error = %error,
            "transport failure ended the session"
        );
        if let Err(disconnect_error) = self.transport.disconnect().await {
            warn!(
                event_name = "frontdesk.session.disconnect_failed",
                session_id = %ctx.session_id,
                error = %disconnect_error,
                "disconnect after transport failure also failed"
            );
        }
        error.into()
    }
}
