use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One reportable (antibiotic, category) combination of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export)]
pub struct ResultOption {
    pub result_text: String,
    /// Opaque code stored in the analysis result when selected.
    pub result_value: String,
    pub interim_keyword: String,
    /// Choice code of the interim field this option stands for.
    pub interim_value: String,
}
