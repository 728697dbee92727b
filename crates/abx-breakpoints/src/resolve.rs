use uuid::Uuid;

use abx_core::keywords::UNSET_TABLE;
use abx_core::models::breakpoint::{Breakpoint, BreakpointsTable};
use abx_core::models::microorganism::Microorganism;

use crate::setup::SetupCatalog;

/// Find the breakpoint of `table` that applies to `microorganism` and
/// `antibiotic`.
///
/// A breakpoint for the microorganism itself beats one for its category.
/// Within the same level the first breakpoint in stored order wins.
pub fn resolve_breakpoint<'t>(
    table: Option<&'t BreakpointsTable>,
    microorganism: Option<&Microorganism>,
    antibiotic: Option<Uuid>,
) -> Option<&'t Breakpoint> {
    let table = table?;
    let microorganism = microorganism?;
    let antibiotic = antibiotic?;

    let candidates = move || {
        table
            .breakpoints
            .iter()
            .filter(move |b| b.antibiotic == antibiotic)
    };

    candidates()
        .find(|b| b.microorganism == microorganism.uid)
        .or_else(|| {
            let category = microorganism.category?;
            let found = candidates().find(|b| b.microorganism == category);
            if found.is_some() {
                tracing::debug!(
                    microorganism = %microorganism.name,
                    antibiotic = %antibiotic,
                    "using category breakpoint"
                );
            }
            found
        })
}

/// The breakpoints table selected by a breakpoints-table interim value.
/// Blank values and the unset sentinel select nothing.
pub fn selected_table<'c, C: SetupCatalog + ?Sized>(
    catalog: &'c C,
    value: &str,
) -> Option<&'c BreakpointsTable> {
    let value = value.trim();
    if value.is_empty() || value == UNSET_TABLE {
        return None;
    }
    let uid: Uuid = value.parse().ok()?;
    catalog.breakpoints_table(&uid)
}
