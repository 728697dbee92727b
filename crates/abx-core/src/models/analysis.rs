use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::keywords::{role, vocabulary};
use crate::models::interim::InterimField;
use crate::models::result_option::ResultOption;

/// The role an AST analysis plays within its cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    #[serde(rename = "senaite_ast_identification")]
    Identification,
    #[serde(rename = "senaite_ast_breakpoint")]
    BreakpointsTable,
    #[serde(rename = "senaite_ast_zone")]
    ZoneSize,
    #[serde(rename = "senaite_ast_mic")]
    MicValue,
    #[serde(rename = "senaite_ast_potency")]
    DiskContent,
    #[serde(rename = "senaite_ast_resistance")]
    Resistance,
    #[serde(rename = "senaite_ast_report")]
    Report,
    #[serde(rename = "senaite_ast_report_extrapolated")]
    ReportExtrapolated,
}

/// Presentation settings of the interim fields created for a role.
#[derive(Debug, Clone, Copy)]
pub struct RoleSettings {
    pub title: &'static str,
    /// Fixed vocabulary; empty for free text or vocabularies built at
    /// assignment time (breakpoints tables, extrapolated antibiotics).
    pub choices: &'static str,
    pub size: &'static str,
    pub result_type: &'static str,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Identification,
        Role::BreakpointsTable,
        Role::ZoneSize,
        Role::MicValue,
        Role::DiskContent,
        Role::Resistance,
        Role::Report,
        Role::ReportExtrapolated,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            Role::Identification => role::IDENTIFICATION,
            Role::BreakpointsTable => role::BREAKPOINTS_TABLE,
            Role::ZoneSize => role::ZONE_SIZE,
            Role::MicValue => role::MIC_VALUE,
            Role::DiskContent => role::DISK_CONTENT,
            Role::Resistance => role::RESISTANCE,
            Role::Report => role::REPORT,
            Role::ReportExtrapolated => role::REPORT_EXTRAPOLATED,
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.keyword() == keyword)
    }

    /// Whether antibiotics of this role can be flagged as "Not Tested".
    /// Reporting roles only carry Y/N selections.
    pub fn is_rejectable(&self) -> bool {
        !matches!(
            self,
            Role::Identification | Role::Report | Role::ReportExtrapolated
        )
    }

    /// Roles whose listing rows must be refreshed when this role is edited.
    pub fn refreshes(&self) -> &'static [Role] {
        match self {
            Role::BreakpointsTable => &[Role::DiskContent, Role::Resistance],
            Role::ZoneSize | Role::MicValue => &[Role::Resistance],
            _ => &[],
        }
    }

    pub fn settings(&self) -> RoleSettings {
        match self {
            Role::Identification => RoleSettings {
                title: "Identification",
                choices: "",
                size: "20",
                result_type: "multiselect",
            },
            Role::BreakpointsTable => RoleSettings {
                title: "Breakpoints table",
                choices: "",
                size: "20",
                result_type: "select",
            },
            Role::ZoneSize => RoleSettings {
                title: "Zone diameter (mm)",
                choices: "",
                size: "3",
                result_type: "",
            },
            Role::MicValue => RoleSettings {
                title: "MIC value (μg/mL)",
                choices: "",
                size: "5",
                result_type: "",
            },
            Role::DiskContent => RoleSettings {
                title: "Disk content (μg)",
                choices: "",
                size: "3",
                result_type: "",
            },
            Role::Resistance => RoleSettings {
                title: "Sensitivity category",
                choices: vocabulary::SENSITIVITY,
                size: "1",
                result_type: "select",
            },
            Role::Report => RoleSettings {
                title: "Report",
                choices: vocabulary::REPORT,
                size: "1",
                result_type: "select",
            },
            Role::ReportExtrapolated => RoleSettings {
                title: "Report extrapolated",
                choices: "",
                size: "20",
                result_type: "multichoice",
            },
        }
    }

    /// Title of an analysis of this role for the given microorganism.
    pub fn analysis_title(&self, microorganism: &str) -> String {
        format!("{} ({microorganism})", self.settings().title)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_keyword(s).ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

/// Workflow state of an analysis, as reported by the host platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReviewState {
    #[default]
    Unassigned,
    Assigned,
    ToBeVerified,
    Verified,
    Published,
    Cancelled,
    Retracted,
    Rejected,
}

impl ReviewState {
    /// Cancelled, retracted and rejected analyses are left out of clusters.
    pub fn is_valid(&self) -> bool {
        !matches!(
            self,
            ReviewState::Cancelled | ReviewState::Retracted | ReviewState::Rejected
        )
    }

    pub fn is_submitted(&self) -> bool {
        matches!(
            self,
            ReviewState::ToBeVerified | ReviewState::Verified | ReviewState::Published
        )
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, ReviewState::Verified | ReviewState::Published)
    }
}

/// Scalar result of an analysis. For the sensitivity-category analysis it
/// is the list of selected result option codes, used only for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[ts(export)]
pub enum AnalysisResult {
    #[default]
    Empty,
    Text(String),
    Selection(Vec<String>),
}

impl AnalysisResult {
    pub fn selection(&self) -> &[String] {
        match self {
            AnalysisResult::Selection(codes) => codes,
            _ => &[],
        }
    }
}

/// Accessors and mutators of a persisted analysis.
///
/// Implemented by the host platform. Getters return owned copies; every
/// `set_interim_fields` call receives a complete list.
pub trait AstAnalysis {
    fn id(&self) -> &str;

    fn keyword(&self) -> &str;

    fn role(&self) -> Option<Role> {
        Role::from_keyword(self.keyword())
    }

    fn sample_id(&self) -> &str;

    /// Name of the microorganism the analysis was created for.
    fn microorganism(&self) -> &str;

    fn interim_fields(&self) -> Vec<InterimField>;

    fn set_interim_fields(&mut self, fields: Vec<InterimField>);

    fn result(&self) -> AnalysisResult;

    fn set_result(&mut self, result: AnalysisResult);

    fn result_options(&self) -> Vec<ResultOption>;

    fn set_result_options(&mut self, options: Vec<ResultOption>);

    fn review_state(&self) -> ReviewState;

    fn is_submitted(&self) -> bool {
        self.review_state().is_submitted()
    }

    fn is_verified(&self) -> bool {
        self.review_state().is_verified()
    }

    /// Roll a submitted analysis back to an editable state. The error
    /// carries the reason the workflow refused the transition.
    fn retract(&mut self) -> Result<(), String>;

    fn is_auditable(&self) -> bool;

    fn set_auditable(&mut self, auditable: bool);
}
