//! Intake agent - completion detection, payload extraction, and call tools
//!
//! This crate is the "brain" of the frontdesk system - the logic that:
//! - Decides when the assistant has finished an intake (`completion`)
//! - Extracts the structured payload embedded in assistant text (`extract`)
//! - Validates caller-supplied street addresses against the external
//!   verification authority (`address`)
//! - Exposes mid-call capabilities to the runtime as function tools (`tools`)
//! - Renders the operating script handed to the external runtime (`script`)
//!
//! # Architecture
//!
//! The completion path is a straight line run once per conversation event:
//! 1. **Completion Detection** (`completion`) - assistant-only sentinel match
//! 2. **Payload Extraction** (`extract`) - greedy brace-span + JSON parse
//! 3. The extracted `IntakeRecord` is handed to the dispatcher by the
//!    surrounding orchestration; this crate never performs side effects.
//!
//! Address validation is a side channel, independent of the completion path:
//! the runtime invokes the `validate_address` tool whenever the script needs
//! an address confirmed mid-conversation.
//!
//! # Safety Principle
//!
//! The model is strictly a narrator. It never decides what was collected:
//! the structured payload it emits is parsed and checked deterministically,
//! and address deliverability comes from the verification authority alone.

pub mod address;
pub mod completion;
pub mod extract;
pub mod runtime;
pub mod script;
pub mod tools;

pub use address::{
    AddressAuthority, AddressQuery, AddressServiceError, AddressStatus, AddressVerdict,
    SmartyAddressClient,
};
pub use completion::CompletionDetector;
pub use extract::{extract, ExtractError};
pub use runtime::IntakeRuntime;
pub use script::{intake_instructions, AppointmentSlot, APPOINTMENT_SLOTS};
pub use tools::{intake_registry, Tool, ToolRegistry, ValidateAddressTool};
