use std::collections::HashMap;

use tracing::{debug, info};
use uuid::Uuid;

use abx_breakpoints::classify::parse_measurement;
use abx_breakpoints::{
    Method, SetupCatalog, classify, classify_to_code, resolve_breakpoint, selected_table,
};
use abx_core::models::microorganism::Microorganism;
use abx_core::{AstAnalysis, Role};

use crate::cluster::{AstGroup, Cluster};
use crate::error::CalcError;
use crate::propagate::propagate_analysis;
use crate::report::update_sensitivity_result;

/// The steps of a recalculation pass, in execution order. Later steps read
/// the values written by earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    DiskDosages,
    SensitivityCategories,
    Extrapolation,
    ReportableResult,
}

const STEPS: [Step; 4] = [
    Step::DiskDosages,
    Step::SensitivityCategories,
    Step::Extrapolation,
    Step::ReportableResult,
];

/// Analyses whose values are mirrored onto extrapolated antibiotics.
const MIRRORED: [Role; 3] = [Role::ZoneSize, Role::Resistance, Role::Report];

impl Step {
    /// Roles whose edition triggers this step.
    fn triggers(&self) -> &'static [Role] {
        match self {
            Step::DiskDosages => &[Role::BreakpointsTable],
            Step::SensitivityCategories => {
                &[Role::BreakpointsTable, Role::ZoneSize, Role::MicValue]
            }
            Step::Extrapolation => &[
                Role::BreakpointsTable,
                Role::ZoneSize,
                Role::MicValue,
                Role::Resistance,
                Role::Report,
            ],
            Step::ReportableResult => &[
                Role::BreakpointsTable,
                Role::ZoneSize,
                Role::MicValue,
                Role::DiskContent,
                Role::Resistance,
                Role::Report,
                Role::ReportExtrapolated,
            ],
        }
    }
}

/// Shared inputs of a recalculation pass.
struct Context<'c, C: ?Sized> {
    catalog: &'c C,
    microorganism: Option<&'c Microorganism>,
}

/// Recalculate the cluster after a result of the analysis `analysis_id`
/// changed.
///
/// Missing counterpart analyses make the dependent steps no-ops; analyses
/// that are not part of a microorganism cluster are ignored. Only integrity
/// violations are errors, and they abort the pass.
pub fn recalculate<A, C>(
    cluster: &mut Cluster<A>,
    analysis_id: &str,
    catalog: &C,
) -> Result<(), CalcError>
where
    A: AstAnalysis,
    C: SetupCatalog + ?Sized,
{
    let analysis = cluster
        .find(analysis_id)
        .ok_or_else(|| CalcError::UnknownAnalysis(analysis_id.to_string()))?;

    let Some(role) = analysis.role() else {
        debug!(analysis = %analysis_id, keyword = %analysis.keyword(), "not an AST analysis");
        return Ok(());
    };

    let ctx = Context {
        catalog,
        microorganism: catalog.microorganism_by_name(&cluster.key().microorganism),
    };

    let mut group = cluster.group()?;
    for step in STEPS {
        if !step.triggers().contains(&role) {
            continue;
        }
        debug!(analysis = %analysis_id, step = ?step, "running step");
        match step {
            Step::DiskDosages => calc_disk_dosages(&mut group, &ctx),
            Step::SensitivityCategories => calc_sensitivity_categories(&mut group, &ctx)?,
            Step::Extrapolation => update_extrapolated(&mut group),
            Step::ReportableResult => update_sensitivity_result(&mut group),
        }
    }
    Ok(())
}

/// Antibiotic uid → raw interim value of the analysis with `role`.
fn values_by_antibiotic<A: AstAnalysis>(
    group: &AstGroup<'_, A>,
    role: Role,
) -> Option<HashMap<Uuid, String>> {
    group.get(role).map(|analysis| {
        analysis
            .interim_fields()
            .into_iter()
            .map(|f| (f.uid, f.value))
            .collect()
    })
}

/// Fill the disk content of each antibiotic with the dose of the resolved
/// breakpoint. Unresolved or zero doses leave the value as is.
fn calc_disk_dosages<A, C>(group: &mut AstGroup<'_, A>, ctx: &Context<'_, C>)
where
    A: AstAnalysis,
    C: SetupCatalog + ?Sized,
{
    let Some(tables) = values_by_antibiotic(group, Role::BreakpointsTable) else {
        return;
    };
    let Some(disks) = group.get_mut(Role::DiskContent) else {
        return;
    };
    if disks.is_submitted() {
        debug!(analysis = %disks.id(), "disk content submitted already");
        return;
    }

    let mut fields = disks.interim_fields();
    let mut changed = false;
    for field in fields.iter_mut().filter(|f| f.is_editable()) {
        let table = tables
            .get(&field.uid)
            .and_then(|value| selected_table(ctx.catalog, value));
        let dose = resolve_breakpoint(table, ctx.microorganism, Some(field.uid))
            .and_then(|bp| bp.dose());
        if let Some(dose) = dose {
            let dose = dose.to_string();
            if field.value != dose {
                field.value = dose;
                changed = true;
            }
        }
    }

    if changed {
        info!(analysis = %disks.id(), "disk content doses updated");
        disks.set_interim_fields(fields);
    }
}

/// Classify every editable, non-extrapolated antibiotic of the sensitivity
/// category analysis from its zone diameter or MIC value.
///
/// The zone diameter wins when both measurements classify. Antibiotics
/// without a numeric measurement are left untouched.
fn calc_sensitivity_categories<A, C>(
    group: &mut AstGroup<'_, A>,
    ctx: &Context<'_, C>,
) -> Result<(), CalcError>
where
    A: AstAnalysis,
    C: SetupCatalog + ?Sized,
{
    let Some(tables) = values_by_antibiotic(group, Role::BreakpointsTable) else {
        return Ok(());
    };
    let zones = values_by_antibiotic(group, Role::ZoneSize).unwrap_or_default();
    let mics = values_by_antibiotic(group, Role::MicValue).unwrap_or_default();

    let Some(sensitivity) = group.get_mut(Role::Resistance) else {
        return Ok(());
    };
    if sensitivity.is_submitted() {
        debug!(analysis = %sensitivity.id(), "sensitivity category submitted already");
        return Ok(());
    }

    let mut fields = sensitivity.interim_fields();
    let mut changed = false;
    for field in fields
        .iter_mut()
        .filter(|f| f.is_editable() && !f.is_extrapolated())
    {
        let zone = zones.get(&field.uid).map(String::as_str).unwrap_or_default();
        let mic = mics.get(&field.uid).map(String::as_str).unwrap_or_default();
        if parse_measurement(zone).is_none() && parse_measurement(mic).is_none() {
            continue;
        }

        let table = tables
            .get(&field.uid)
            .and_then(|value| selected_table(ctx.catalog, value));
        let breakpoint = resolve_breakpoint(table, ctx.microorganism, Some(field.uid));

        let category = classify(zone, breakpoint, Method::ZoneDiameter)
            .or_else(|| classify(mic, breakpoint, Method::Mic));
        let value = match category {
            Some(category) => classify_to_code(category.label())?,
            None => String::new(),
        };

        if field.value != value {
            debug!(keyword = %field.keyword, category = ?category, "sensitivity category");
            field.value = value;
            changed = true;
        }
    }

    if changed {
        info!(analysis = %sensitivity.id(), "sensitivity categories updated");
        sensitivity.set_interim_fields(fields);
    }
    Ok(())
}

fn update_extrapolated<A: AstAnalysis>(group: &mut AstGroup<'_, A>) {
    for role in MIRRORED {
        if let Some(analysis) = group.get_mut(role) {
            propagate_analysis(analysis);
        }
    }
}
