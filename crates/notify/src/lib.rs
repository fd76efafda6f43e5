//! Side effects for completed intakes
//!
//! Once a conversation yields a valid `IntakeRecord`, this crate performs
//! the configured effects:
//! - **Email** (`email`) - one plain-text summary sent through an
//!   authenticated STARTTLS relay to the distribution list
//! - **Archive** (`archive`) - the record written as pretty-printed JSON,
//!   overwriting any prior file
//! - **Dispatch** (`dispatch`) - the idempotent fan-out: at most one set of
//!   effects per session, effects attempted independently, failures logged
//!   and reported but never raised into the session
//!
//! The conversation has concluded by the time anything here runs, so no
//! failure in this crate is ever voiced to a caller.

pub mod archive;
pub mod dispatch;
pub mod email;

pub use archive::{Archive, ArchiveError, JsonArchive};
pub use dispatch::{DispatchOutcome, DispatchReport, EffectStatus, IntakeDispatcher};
pub use email::{summary_text, Mailer, NotifyError, SmtpNotifier};
