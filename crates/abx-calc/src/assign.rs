use tracing::{info, warn};
use uuid::Uuid;

use abx_breakpoints::SetupCatalog;
use abx_core::keywords::UNSET_TABLE;
use abx_core::models::antibiotic::Antibiotic;
use abx_core::{AstAnalysis, Choice, Choices, InterimField, Role};

use crate::cluster::Cluster;
use crate::error::CalcError;
use crate::options::result_options;

/// Roles whose interim lists carry mirrors of extrapolated antibiotics.
fn carries_mirrors(role: Role) -> bool {
    matches!(role, Role::ZoneSize | Role::Resistance | Role::Report)
}

/// Interim fields of an analysis with `role` for the given antibiotics.
///
/// Each representative is followed by mirrors of its extrapolated
/// antibiotics on the roles that carry them, unless they were selected
/// explicitly. The extrapolated-reporting role gets one multi-select field
/// per representative with extrapolated antibiotics.
pub fn build_interims<C: SetupCatalog + ?Sized>(
    role: Role,
    antibiotics: &[Uuid],
    catalog: &C,
) -> Result<Vec<InterimField>, CalcError> {
    let settings = role.settings();
    let mut fields: Vec<InterimField> = Vec::new();

    for uid in antibiotics {
        let antibiotic = catalog
            .antibiotic(uid)
            .ok_or(CalcError::UnknownAntibiotic(*uid))?;

        let choices = match role {
            Role::BreakpointsTable => table_choices(catalog)?,
            Role::ReportExtrapolated => {
                if antibiotic.extrapolated.is_empty() {
                    continue;
                }
                extrapolated_choices(antibiotic, catalog)?
            }
            _ => settings.choices.parse::<Choices>()?,
        };
        fields.push(to_interim(role, antibiotic, choices.clone()));

        if !carries_mirrors(role) {
            continue;
        }
        for target in &antibiotic.extrapolated {
            if antibiotics.contains(target) || fields.iter().any(|f| f.uid == *target) {
                continue;
            }
            let target = catalog
                .antibiotic(target)
                .ok_or(CalcError::UnknownAntibiotic(*target))?;
            fields.push(to_interim(role, target, choices.clone()).with_primary(antibiotic.uid));
        }
    }
    Ok(fields)
}

fn to_interim(role: Role, antibiotic: &Antibiotic, choices: Choices) -> InterimField {
    let settings = role.settings();
    let mut field = InterimField::new(antibiotic.uid, &antibiotic.abbreviation).with_choices(choices);
    field.size = settings.size.to_string();
    field.result_type = settings.result_type.to_string();
    field.full_title = Some(antibiotic.title.clone());
    field
}

fn table_choices<C: SetupCatalog + ?Sized>(catalog: &C) -> Result<Choices, CalcError> {
    let choices = std::iter::once(Choice::new(UNSET_TABLE, ""))
        .chain(
            catalog
                .breakpoints_tables()
                .into_iter()
                .map(|t| Choice::new(t.uid.to_string(), &t.title)),
        )
        .collect();
    Ok(Choices::new(choices)?)
}

fn extrapolated_choices<C: SetupCatalog + ?Sized>(
    antibiotic: &Antibiotic,
    catalog: &C,
) -> Result<Choices, CalcError> {
    let choices = antibiotic
        .extrapolated
        .iter()
        .map(|uid| {
            catalog
                .antibiotic(uid)
                .map(|a| Choice::new(uid.to_string(), &a.abbreviation))
                .ok_or(CalcError::UnknownAntibiotic(*uid))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Choices::new(choices)?)
}

/// Assign a new set of antibiotics to an analysis.
///
/// Verified analyses and analyses holding all the antibiotics already are
/// left alone. A submitted analysis is retracted first; if the workflow
/// refuses, the update is abandoned with a warning. Kept antibiotics keep
/// their values. Returns whether the analysis was updated.
pub fn update_antibiotics<A: AstAnalysis + ?Sized>(
    analysis: &mut A,
    interims: Vec<InterimField>,
) -> Result<bool, CalcError> {
    if analysis.is_verified() {
        return Ok(false);
    }

    let existing = analysis.interim_fields();
    let missing = interims
        .iter()
        .any(|new| !existing.iter().any(|f| f.uid == new.uid));
    if !missing {
        return Ok(false);
    }

    if analysis.is_submitted()
        && let Err(reason) = analysis.retract()
    {
        warn!(analysis = %analysis.id(), %reason, "cannot retract analysis");
        return Ok(false);
    }

    let fields: Vec<InterimField> = interims
        .into_iter()
        .map(|new| {
            existing
                .iter()
                .find(|f| f.uid == new.uid)
                .cloned()
                .unwrap_or(new)
        })
        .collect();

    analysis.set_result_options(result_options(&fields));
    analysis.set_interim_fields(fields);
    info!(analysis = %analysis.id(), "antibiotics updated");
    Ok(true)
}

/// Assign `antibiotics` to every analysis of the cluster. Analyses whose
/// update is refused are skipped and the rest of the cluster proceeds.
/// Returns the ids of the analyses updated.
pub fn update_cluster_antibiotics<A, C>(
    cluster: &mut Cluster<A>,
    antibiotics: &[Uuid],
    catalog: &C,
) -> Result<Vec<String>, CalcError>
where
    A: AstAnalysis,
    C: SetupCatalog + ?Sized,
{
    let mut updated = Vec::new();
    for analysis in cluster.analyses_mut() {
        if !analysis.review_state().is_valid() {
            continue;
        }
        let Some(role) = analysis.role() else {
            continue;
        };
        if role == Role::Identification {
            continue;
        }
        let interims = build_interims(role, antibiotics, catalog)?;
        if update_antibiotics(analysis, interims)? {
            updated.push(analysis.id().to_string());
        }
    }
    Ok(updated)
}
