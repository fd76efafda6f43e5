pub mod config;
pub mod conversation;
pub mod errors;
pub mod intake;

pub use config::{
    AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat, DEFAULT_GREETING,
    DEFAULT_REQUIRED_FIELDS, DEFAULT_SENTINELS,
};
pub use conversation::{ConversationEvent, Role};
pub use errors::{ApplicationError, DomainError};
pub use intake::{FieldPolicy, IntakeRecord};
