use thiserror::Error;
use uuid::Uuid;

use abx_core::CoreError;

#[derive(Debug, Error)]
pub enum BreakpointError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate {kind} uid: {uid}")]
    DuplicateUid { kind: &'static str, uid: Uuid },

    #[error("breakpoint in table '{table}' references unknown antibiotic {antibiotic}")]
    UnknownAntibiotic { table: String, antibiotic: Uuid },
}
