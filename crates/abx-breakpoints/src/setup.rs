use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use abx_core::models::antibiotic::{Antibiotic, validate_extrapolation};
use abx_core::models::breakpoint::BreakpointsTable;
use abx_core::models::microorganism::Microorganism;

use crate::error::BreakpointError;

/// Read-only lookup of the setup objects AST calculations depend on.
pub trait SetupCatalog {
    fn antibiotic(&self, uid: &Uuid) -> Option<&Antibiotic>;

    fn microorganism_by_name(&self, name: &str) -> Option<&Microorganism>;

    fn breakpoints_table(&self, uid: &Uuid) -> Option<&BreakpointsTable>;

    /// All breakpoints tables, in the order they are offered for selection.
    fn breakpoints_tables(&self) -> Vec<&BreakpointsTable>;

    /// Antibiotics whose results are extrapolated from `uid`.
    fn extrapolated_antibiotic_uids(&self, uid: &Uuid) -> Vec<Uuid> {
        self.antibiotic(uid)
            .map(|a| a.extrapolated.clone())
            .unwrap_or_default()
    }
}

/// In-memory setup catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Setup {
    #[serde(default)]
    pub antibiotics: Vec<Antibiotic>,
    #[serde(default)]
    pub microorganisms: Vec<Microorganism>,
    #[serde(default)]
    pub breakpoints_tables: Vec<BreakpointsTable>,
}

impl Setup {
    pub fn from_json(raw: &str) -> Result<Self, BreakpointError> {
        let setup: Setup = serde_json::from_str(raw)?;
        setup.validate()?;
        Ok(setup)
    }

    /// Check identifiers are unique, breakpoints reference known
    /// antibiotics and the extrapolation graph is acyclic.
    pub fn validate(&self) -> Result<(), BreakpointError> {
        unique("antibiotic", self.antibiotics.iter().map(|a| a.uid))?;
        unique("microorganism", self.microorganisms.iter().map(|m| m.uid))?;
        unique(
            "breakpoints table",
            self.breakpoints_tables.iter().map(|t| t.uid),
        )?;

        for table in &self.breakpoints_tables {
            for breakpoint in &table.breakpoints {
                if self.antibiotic(&breakpoint.antibiotic).is_none() {
                    return Err(BreakpointError::UnknownAntibiotic {
                        table: table.title.clone(),
                        antibiotic: breakpoint.antibiotic,
                    });
                }
            }
        }

        validate_extrapolation(&self.antibiotics)?;
        Ok(())
    }

    /// Antibiotic by abbreviation, ignoring ASCII case.
    pub fn antibiotic_by_abbreviation(&self, abbreviation: &str) -> Option<&Antibiotic> {
        self.antibiotics
            .iter()
            .find(|a| a.abbreviation.eq_ignore_ascii_case(abbreviation))
    }

    /// Breakpoints table by uid or, failing that, by title.
    pub fn breakpoints_table_by_ref(&self, reference: &str) -> Option<&BreakpointsTable> {
        match reference.parse::<Uuid>() {
            Ok(uid) => self.breakpoints_table(&uid),
            Err(_) => self.breakpoints_tables.iter().find(|t| t.title == reference),
        }
    }

    /// Names of active microorganisms, sorted ascending.
    pub fn active_microorganism_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .microorganisms
            .iter()
            .filter(|m| m.active)
            .map(|m| m.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

fn unique(kind: &'static str, uids: impl Iterator<Item = Uuid>) -> Result<(), BreakpointError> {
    let mut seen = HashSet::new();
    for uid in uids {
        if !seen.insert(uid) {
            return Err(BreakpointError::DuplicateUid { kind, uid });
        }
    }
    Ok(())
}

impl SetupCatalog for Setup {
    fn antibiotic(&self, uid: &Uuid) -> Option<&Antibiotic> {
        self.antibiotics.iter().find(|a| a.uid == *uid)
    }

    fn microorganism_by_name(&self, name: &str) -> Option<&Microorganism> {
        self.microorganisms.iter().find(|m| m.name == name)
    }

    fn breakpoints_table(&self, uid: &Uuid) -> Option<&BreakpointsTable> {
        self.breakpoints_tables.iter().find(|t| t.uid == *uid)
    }

    fn breakpoints_tables(&self) -> Vec<&BreakpointsTable> {
        self.breakpoints_tables.iter().collect()
    }
}
