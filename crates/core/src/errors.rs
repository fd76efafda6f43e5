use thiserror::Error;

/// Violations of the intake record contract. Raised by the dispatcher when a
/// record does not satisfy the deployment's required-field policy; never
/// raised by extraction, which is purely syntactic.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("intake record is missing required field `{field}`")]
    MissingRequiredField { field: String },
    #[error("intake record field `{field}` is present but empty")]
    EmptyRequiredField { field: String },
}

/// Uniform classification for failures that cross module boundaries. Effect
/// failures are carried inside dispatch reports as values rather than thrown,
/// so sessions keep running while operators still get a typed error class.
/// None of these are ever voiced to the caller: side effects fire after the
/// conversation has concluded, and anything address-related reaches the
/// caller as a verdict reason instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("notification failure: {0}")]
    Notification(String),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Short class label used as a structured log field.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "domain",
            Self::Notification(_) => "notification",
            Self::Persistence(_) => "persistence",
            Self::Configuration(_) => "configuration",
        }
    }
}
