use tracing::{debug, info};
use uuid::Uuid;

use abx_core::keywords::not_tested;
use abx_core::{AstAnalysis, Choice, InterimField, Role};

use crate::cluster::Cluster;
use crate::error::CalcError;
use crate::options::result_options;
use crate::report::update_sensitivity_result;

/// Flag `antibiotics` as "Not Tested" in every analysis of the cluster
/// except the reporting ones, then refresh the reportable result.
///
/// Fields extrapolated from a rejected antibiotic are flagged with it.
/// Submitted analyses are flagged too; fields rejected already are left as
/// they are. Returns the number of interim fields flagged.
pub fn reject<A: AstAnalysis>(
    cluster: &mut Cluster<A>,
    antibiotics: &[Uuid],
    actor: &str,
) -> Result<usize, CalcError> {
    // Duplicate roles abort the pass before any field is flagged.
    cluster.group()?;

    let now = jiff::Timestamp::now();
    let mut flagged = 0;

    for analysis in cluster.analyses_mut() {
        if !analysis.review_state().is_valid() {
            continue;
        }
        let Some(role) = analysis.role().filter(Role::is_rejectable) else {
            continue;
        };
        let mut fields = analysis.interim_fields();
        let mut changed = false;
        for field in fields
            .iter_mut()
            .filter(|f| is_rejected_antibiotic(f, antibiotics) && !f.is_rejected())
        {
            flag_not_tested(field, now, actor);
            info!(analysis = %analysis.id(), keyword = %field.keyword, "flagged as not tested");
            flagged += 1;
            changed = true;
        }
        if !changed {
            debug!(analysis = %analysis.id(), "nothing to flag");
            continue;
        }

        if role == Role::Resistance {
            analysis.set_result_options(result_options(&fields));
        }
        analysis.set_interim_fields(fields);
    }

    let mut group = cluster.group()?;
    update_sensitivity_result(&mut group);
    Ok(flagged)
}

fn is_rejected_antibiotic(field: &InterimField, antibiotics: &[Uuid]) -> bool {
    antibiotics.contains(&field.uid) || field.primary.is_some_and(|p| antibiotics.contains(&p))
}

fn flag_not_tested(field: &mut InterimField, at: jiff::Timestamp, actor: &str) {
    field.status_rejected = Some(at);
    field.status_rejected_by = Some(actor.to_string());

    if field.is_choice() {
        field
            .choices
            .insert_front(Choice::new(not_tested::CODE, not_tested::LABEL));
        field.value = not_tested::CODE.to_string();
    } else {
        field.value = not_tested::TEXT.to_string();
        field.result_type = not_tested::RESULT_TYPE.to_string();
    }
}
