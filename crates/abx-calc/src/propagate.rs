use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use abx_core::{AstAnalysis, InterimField};

/// Copy each representative's value onto the fields extrapolated from it.
///
/// Representatives and their mirrors always live in the same list.
/// Rejected mirrors keep their "Not Tested" value. Returns whether any
/// value changed.
pub fn propagate_extrapolated(fields: &mut [InterimField]) -> bool {
    let values: HashMap<Uuid, String> = fields
        .iter()
        .filter(|f| !f.is_extrapolated())
        .map(|f| (f.uid, f.value.clone()))
        .collect();

    let mut changed = false;
    for field in fields.iter_mut() {
        let Some(primary) = field.primary else {
            continue;
        };
        if field.is_rejected() {
            continue;
        }
        if let Some(value) = values.get(&primary)
            && field.value != *value
        {
            field.value.clone_from(value);
            changed = true;
        }
    }
    changed
}

/// Propagate extrapolated values within one analysis. Submitted analyses
/// are left untouched.
pub fn propagate_analysis<A: AstAnalysis + ?Sized>(analysis: &mut A) {
    if analysis.is_submitted() {
        debug!(analysis = %analysis.id(), "submitted, skipping extrapolation");
        return;
    }
    let mut fields = analysis.interim_fields();
    if propagate_extrapolated(&mut fields) {
        analysis.set_interim_fields(fields);
    }
}
