use serde::{Deserialize, Serialize};

/// Author of one conversation turn, as reported by the external runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One emitted unit of the live conversation stream. Read-only to this
/// system and never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationEvent {
    pub role: Role,
    pub text_content: String,
}

impl ConversationEvent {
    pub fn user(text_content: impl Into<String>) -> Self {
        Self { role: Role::User, text_content: text_content.into() }
    }

    pub fn assistant(text_content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text_content: text_content.into() }
    }
}
