use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Antibiotic {
    pub uid: Uuid,
    /// Short abbreviation, used as interim keyword.
    pub abbreviation: String,
    pub title: String,
    /// Antibiotics whose result is inferred from this one and never entered
    /// independently.
    #[serde(default)]
    pub extrapolated: Vec<Uuid>,
}

impl Antibiotic {
    pub fn new(uid: Uuid, abbreviation: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uid,
            abbreviation: abbreviation.into(),
            title: title.into(),
            extrapolated: Vec::new(),
        }
    }

    pub fn with_extrapolated(mut self, extrapolated: Vec<Uuid>) -> Self {
        self.extrapolated = extrapolated;
        self
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

/// Reject extrapolation graphs that are reflexive or cyclic.
///
/// Propagation mirrors a representative onto its targets in a single pass,
/// so a cycle would make the outcome depend on field order.
pub fn validate_extrapolation(antibiotics: &[Antibiotic]) -> Result<(), CoreError> {
    let graph: HashMap<Uuid, &[Uuid]> = antibiotics
        .iter()
        .map(|a| (a.uid, a.extrapolated.as_slice()))
        .collect();

    for antibiotic in antibiotics {
        if antibiotic.extrapolated.contains(&antibiotic.uid) {
            return Err(CoreError::SelfExtrapolation(antibiotic.uid));
        }
    }

    let mut marks: HashMap<Uuid, Mark> = HashMap::new();
    for antibiotic in antibiotics {
        visit(antibiotic.uid, &graph, &mut marks)?;
    }
    Ok(())
}

fn visit(
    uid: Uuid,
    graph: &HashMap<Uuid, &[Uuid]>,
    marks: &mut HashMap<Uuid, Mark>,
) -> Result<(), CoreError> {
    match marks.get(&uid) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => return Err(CoreError::ExtrapolationCycle(uid)),
        None => {}
    }

    marks.insert(uid, Mark::Visiting);
    for target in graph.get(&uid).copied().unwrap_or_default() {
        visit(*target, graph, marks)?;
    }
    marks.insert(uid, Mark::Done);
    Ok(())
}
