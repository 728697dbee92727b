use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::keywords::not_tested;
use crate::models::choices::{Choice, Choices};

/// Per-antibiotic cell of data attached to an analysis.
///
/// The serialized layout is the flat key/value mapping other tooling reads,
/// so field names must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InterimField {
    /// Antibiotic this field belongs to.
    pub uid: Uuid,
    /// Antibiotic abbreviation.
    pub keyword: String,
    pub title: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    #[ts(type = "string")]
    pub choices: Choices,
    /// Representative antibiotic when this field mirrors an extrapolated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<Uuid>,
    #[serde(default)]
    pub size: String,
    #[serde(default, rename = "type")]
    pub result_type: String,
    /// Antibiotic display name, used for result option texts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_title: Option<String>,
    #[serde(default)]
    pub status_rejected: Option<jiff::Timestamp>,
    #[serde(default)]
    pub status_rejected_by: Option<String>,
    #[serde(default)]
    pub status_submitted: Option<jiff::Timestamp>,
    #[serde(default)]
    pub status_submitted_by: Option<String>,
    #[serde(default)]
    pub status_verified: Option<jiff::Timestamp>,
    #[serde(default)]
    pub status_verified_by: Option<String>,
}

impl InterimField {
    pub fn new(uid: Uuid, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        Self {
            uid,
            title: keyword.clone(),
            keyword,
            value: String::new(),
            choices: Choices::default(),
            primary: None,
            size: String::new(),
            result_type: String::new(),
            full_title: None,
            status_rejected: None,
            status_rejected_by: None,
            status_submitted: None,
            status_submitted_by: None,
            status_verified: None,
            status_verified_by: None,
        }
    }

    pub fn with_choices(mut self, choices: Choices) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_primary(mut self, primary: Uuid) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Whether the field uses a choice vocabulary instead of free text.
    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Codes selected in a choice-coded field. Multi-select values are
    /// stored as a JSON array of codes; anything else is a single code.
    pub fn selected_codes(&self) -> Vec<String> {
        let raw = self.value.trim();
        if raw.is_empty() {
            return Vec::new();
        }
        if raw.starts_with('[')
            && let Ok(codes) = serde_json::from_str::<Vec<String>>(raw)
        {
            return codes;
        }
        vec![raw.to_string()]
    }

    /// A field is empty when it holds no value, or when every selected code
    /// maps to the blank placeholder choice.
    pub fn is_empty(&self) -> bool {
        if self.value.trim().is_empty() {
            return true;
        }
        if !self.is_choice() {
            return false;
        }
        self.selected_codes()
            .iter()
            .all(|code| self.choices.label(code).is_none_or(str::is_empty))
    }

    /// Human-readable value: the labels of the selected choices joined by
    /// `separator`, or the raw value for free-text fields.
    pub fn display_text(&self, separator: &str) -> String {
        if !self.is_choice() {
            return self.value.clone();
        }
        self.selected_codes()
            .iter()
            .filter_map(|code| self.choices.label(code))
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Whether any lock status (rejected, submitted, verified) is stamped.
    pub fn is_locked(&self) -> bool {
        self.status_rejected.is_some()
            || self.status_submitted.is_some()
            || self.status_verified.is_some()
    }

    /// Locked fields with a value are frozen; an empty field stays editable.
    pub fn is_editable(&self) -> bool {
        self.is_empty() || !self.is_locked()
    }

    pub fn is_extrapolated(&self) -> bool {
        self.primary.is_some()
    }

    pub fn is_rejected(&self) -> bool {
        self.status_rejected.is_some()
    }

    /// Whether the field has been flagged as "Not Tested".
    pub fn is_not_tested(&self) -> bool {
        if self.is_rejected() {
            return true;
        }
        if self.is_choice() {
            self.value == not_tested::CODE
        } else {
            self.value == not_tested::TEXT
        }
    }

    pub fn choice_list(&self) -> &[Choice] {
        self.choices.as_slice()
    }

    /// Display name of the antibiotic, falling back to the title.
    pub fn display_name(&self) -> &str {
        self.full_title.as_deref().unwrap_or(&self.title)
    }
}
