//! Voice runtime interface - conversation event stream plumbing
//!
//! This crate is the seam between frontdesk and the external voice-agent
//! runtime (audio, STT/TTS, turn-taking, and model inference all live on the
//! other side of it):
//! - **Events** (`events`) - role-keyed dispatch of conversation events to
//!   registered handlers, one handler per turn author
//! - **Session** (`session`) - the per-session pump loop over a
//!   `VoiceTransport`: connect, speak the greeting, route events one at a
//!   time, disconnect
//!
//! # Architecture
//!
//! ```text
//! Voice Runtime → VoiceTransport → SessionRunner → EventDispatcher → Handlers
//!                      ↑
//!                say(reply)
//! ```
//!
//! Events arrive sequentially; handlers run in-line on the event path. The
//! dispatcher is built per session and dropped with it, so nothing is
//! registered globally.

pub mod events;
pub mod session;

pub use frontdesk_core::{ConversationEvent, Role};

pub use events::{
    default_dispatcher, AssistantTurnHandler, AssistantTurnService, DispatchError,
    EventDispatcher, EventHandler, EventHandlerError, HandlerResult, NoopAssistantTurnService,
    SessionContext,
};
pub use session::{NoopVoiceTransport, SessionError, SessionRunner, TransportError, VoiceTransport};
