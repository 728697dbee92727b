use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed choice '{0}': expected 'code:label'")]
    MalformedChoice(String),

    #[error("duplicate choice code: {0}")]
    DuplicateChoiceCode(String),

    #[error("unknown analysis role keyword: {0}")]
    UnknownRole(String),

    #[error("unknown sensitivity category: '{0}'")]
    UnknownCategory(String),

    #[error("antibiotic {0} lists itself as extrapolated")]
    SelfExtrapolation(Uuid),

    #[error("extrapolation cycle through antibiotic {0}")]
    ExtrapolationCycle(Uuid),
}
