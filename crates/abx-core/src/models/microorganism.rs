use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Microorganism {
    pub uid: Uuid,
    pub name: String,
    /// Category used as breakpoint fallback grouping.
    #[serde(default)]
    pub category: Option<Uuid>,
    /// Display-only flag.
    #[serde(default)]
    pub multi_resistant: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
