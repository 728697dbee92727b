use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Mutations of an analysis that end up in its audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    InterimFieldsUpdated,
    ResultUpdated,
    Retracted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::InterimFieldsUpdated => "interim_fields_updated",
            AuditAction::ResultUpdated => "result_updated",
            AuditAction::Retracted => "retracted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an analysis audit trail.
///
/// Hosts keep the events next to the analysis; each one is also logged
/// through `tracing` when emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub analysis: String,
    pub actor: String,
    pub at: jiff::Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: AuditAction, analysis: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            action,
            analysis: analysis.into(),
            actor: actor.into(),
            at: jiff::Timestamp::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn emit(&self) {
        info!(
            audit.action = %self.action,
            audit.analysis = %self.analysis,
            audit.actor = %self.actor,
            audit.at = %self.at,
            audit.details = ?self.details,
            "audit event"
        );
    }
}
