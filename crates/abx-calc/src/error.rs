use thiserror::Error;
use uuid::Uuid;

use abx_core::{CoreError, Role};

#[derive(Debug, Error)]
pub enum CalcError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("duplicate {role} analyses for sample '{sample_id}' and microorganism '{microorganism}'")]
    DuplicateRole {
        role: Role,
        sample_id: String,
        microorganism: String,
    },

    #[error("analysis '{0}' not found in cluster")]
    UnknownAnalysis(String),

    #[error("analysis '{analysis}' does not belong to cluster {sample_id}/{microorganism}")]
    ForeignAnalysis {
        analysis: String,
        sample_id: String,
        microorganism: String,
    },

    #[error("unknown antibiotic: {0}")]
    UnknownAntibiotic(Uuid),
}
