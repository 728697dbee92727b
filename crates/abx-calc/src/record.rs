use serde::{Deserialize, Serialize};

use abx_audit::{AuditAction, AuditEvent};
use abx_core::{AnalysisResult, AstAnalysis, InterimField, ResultOption, ReviewState, Role};

const DEFAULT_ACTOR: &str = "system";

fn default_true() -> bool {
    true
}

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

/// A self-contained analysis as stored in a JSON workbook.
///
/// Mutations made while auditing is enabled are recorded in `audit_log`
/// and emitted as tracing events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub keyword: String,
    #[serde(default)]
    pub title: String,
    pub sample_id: String,
    #[serde(default)]
    pub microorganism: String,
    #[serde(default)]
    pub interim_fields: Vec<InterimField>,
    #[serde(default)]
    pub result: AnalysisResult,
    #[serde(default)]
    pub result_options: Vec<ResultOption>,
    #[serde(default)]
    pub review_state: ReviewState,
    #[serde(default = "default_true")]
    pub auditable: bool,
    /// Who the audit events of this record are attributed to.
    #[serde(default = "default_actor")]
    pub actor: String,
    #[serde(default)]
    pub audit_log: Vec<AuditEvent>,
}

impl AnalysisRecord {
    pub fn new(
        id: impl Into<String>,
        role: Role,
        sample_id: impl Into<String>,
        microorganism: impl Into<String>,
    ) -> Self {
        let microorganism = microorganism.into();
        Self {
            id: id.into(),
            keyword: role.keyword().to_string(),
            title: role.analysis_title(&microorganism),
            sample_id: sample_id.into(),
            microorganism,
            interim_fields: Vec::new(),
            result: AnalysisResult::Empty,
            result_options: Vec::new(),
            review_state: ReviewState::Assigned,
            auditable: true,
            actor: default_actor(),
            audit_log: Vec::new(),
        }
    }

    pub fn with_interim_fields(mut self, fields: Vec<InterimField>) -> Self {
        self.interim_fields = fields;
        self
    }

    pub fn with_review_state(mut self, state: ReviewState) -> Self {
        self.review_state = state;
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Interim field holding the antibiotic with the given keyword.
    pub fn interim(&self, keyword: &str) -> Option<&InterimField> {
        self.interim_fields.iter().find(|f| f.keyword == keyword)
    }

    fn audit(&mut self, action: AuditAction, details: serde_json::Value) {
        if !self.auditable {
            return;
        }
        let event = AuditEvent::new(action, &self.id, &self.actor).with_details(details);
        event.emit();
        self.audit_log.push(event);
    }
}

impl AstAnalysis for AnalysisRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn sample_id(&self) -> &str {
        &self.sample_id
    }

    fn microorganism(&self) -> &str {
        &self.microorganism
    }

    fn interim_fields(&self) -> Vec<InterimField> {
        self.interim_fields.clone()
    }

    fn set_interim_fields(&mut self, fields: Vec<InterimField>) {
        let changed: Vec<&str> = fields
            .iter()
            .filter(|new| {
                self.interim_fields
                    .iter()
                    .find(|old| old.uid == new.uid)
                    .is_none_or(|old| old.value != new.value)
            })
            .map(|f| f.keyword.as_str())
            .collect();
        let details = serde_json::json!({ "changed": changed });
        self.interim_fields = fields;
        self.audit(AuditAction::InterimFieldsUpdated, details);
    }

    fn result(&self) -> AnalysisResult {
        self.result.clone()
    }

    fn set_result(&mut self, result: AnalysisResult) {
        let details = serde_json::json!({ "from": &self.result, "to": &result });
        self.result = result;
        self.audit(AuditAction::ResultUpdated, details);
    }

    fn result_options(&self) -> Vec<ResultOption> {
        self.result_options.clone()
    }

    fn set_result_options(&mut self, options: Vec<ResultOption>) {
        self.result_options = options;
    }

    fn review_state(&self) -> ReviewState {
        self.review_state
    }

    fn retract(&mut self) -> Result<(), String> {
        match self.review_state {
            ReviewState::ToBeVerified => {
                self.review_state = ReviewState::Assigned;
                self.audit(AuditAction::Retracted, serde_json::Value::Null);
                Ok(())
            }
            state if state.is_verified() => {
                Err(format!("analysis {} is {state:?}", self.id))
            }
            _ => Ok(()),
        }
    }

    fn is_auditable(&self) -> bool {
        self.auditable
    }

    fn set_auditable(&mut self, auditable: bool) {
        self.auditable = auditable;
    }
}
