use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use abx_core::keywords::vocabulary;
use abx_core::{AnalysisResult, AstAnalysis, InterimField, Role};

use crate::cluster::AstGroup;

/// Antibiotics of the cluster whose sensitivity category goes to the
/// report, as `(keyword, category code)` pairs in interim order.
///
/// Only classified categories qualify; "Not Tested" never does. With a
/// selective reporting analysis in the cluster, representatives need their
/// own "Y" flag while extrapolated antibiotics need to be listed in their
/// representative's extrapolated-reporting selection. Their own Y/N mirror
/// is ignored.
pub fn reportable_antibiotics<A: AstAnalysis>(group: &AstGroup<'_, A>) -> Vec<(String, String)> {
    let Some(sensitivity) = group.get(Role::Resistance) else {
        return Vec::new();
    };

    let mut results: Vec<InterimField> = sensitivity
        .interim_fields()
        .into_iter()
        .filter(|f| !f.is_empty() && !f.is_not_tested())
        .collect();

    if let Some(report) = group.get(Role::Report) {
        let flagged: HashSet<Uuid> = report
            .interim_fields()
            .into_iter()
            .filter(|f| f.value == vocabulary::REPORT_YES)
            .map(|f| f.uid)
            .collect();

        let extrapolated: HashMap<Uuid, Vec<String>> = group
            .get(Role::ReportExtrapolated)
            .map(|a| {
                a.interim_fields()
                    .into_iter()
                    .map(|f| (f.uid, f.selected_codes()))
                    .collect()
            })
            .unwrap_or_default();

        results.retain(|field| match field.primary {
            None => flagged.contains(&field.uid),
            Some(primary) => {
                let uid = field.uid.to_string();
                extrapolated
                    .get(&primary)
                    .is_some_and(|codes| codes.contains(&uid))
            }
        });
    }

    results.into_iter().map(|f| (f.keyword, f.value)).collect()
}

/// Recompute the final result of the sensitivity category analysis: the
/// codes of the result options matching a reportable antibiotic, in option
/// order.
///
/// This is an internal write, so auditing is suspended for it alone.
pub fn update_sensitivity_result<A: AstAnalysis>(group: &mut AstGroup<'_, A>) {
    let reportable = reportable_antibiotics(group);
    let key = group.key().clone();
    let Some(sensitivity) = group.get_mut(Role::Resistance) else {
        debug!(cluster = %key, "no sensitivity category analysis");
        return;
    };

    let selection: Vec<String> = sensitivity
        .result_options()
        .into_iter()
        .filter(|option| {
            reportable.iter().any(|(keyword, value)| {
                *keyword == option.interim_keyword && *value == option.interim_value
            })
        })
        .map(|option| option.result_value)
        .collect();

    let mut sensitivity = abx_audit::suspend(sensitivity);
    sensitivity.set_result(AnalysisResult::Selection(selection));
}
