mod common;

use abx_calc::{AnalysisRecord, CalcError, recalculate, reject};
use abx_core::{ReviewState, Role};
use common::{ECOLI, SAMPLE, analysis, analysis_id, analysis_mut, enter, lab, value};

fn reported_cluster(lab: &common::Lab) -> abx_calc::Cluster<abx_calc::AnalysisRecord> {
    let mut cluster = lab.cluster();
    let table = lab.table.to_string();
    enter(&mut cluster, Role::BreakpointsTable, "AMP", &table);
    enter(&mut cluster, Role::BreakpointsTable, "CIP", &table);
    enter(&mut cluster, Role::ZoneSize, "AMP", "12");
    enter(&mut cluster, Role::ZoneSize, "CIP", "24");
    enter(&mut cluster, Role::Report, "AMP", "1");
    enter(&mut cluster, Role::Report, "CIP", "1");
    recalculate(&mut cluster, &analysis_id(Role::BreakpointsTable), &lab.setup).unwrap();
    cluster
}

#[test]
fn rejection_flags_not_tested_everywhere_but_reports() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);

    let flagged = reject(&mut cluster, &[lab.amp], "labman").unwrap();
    // Breakpoints table, zone, MIC, disk content and sensitivity category.
    assert_eq!(flagged, 5);

    let category = analysis(&cluster, Role::Resistance).interim("AMP").unwrap();
    assert_eq!(category.value, "-1");
    assert_eq!(category.choices.label("-1"), Some("Not Tested"));
    assert_eq!(category.status_rejected_by.as_deref(), Some("labman"));
    assert!(category.is_not_tested());

    let zone = analysis(&cluster, Role::ZoneSize).interim("AMP").unwrap();
    assert_eq!(zone.value, "NT");
    assert_eq!(zone.result_type, "string");

    assert_eq!(value(&cluster, Role::BreakpointsTable, "AMP"), "-1");
    assert_eq!(value(&cluster, Role::Report, "AMP"), "1");
    assert!(analysis(&cluster, Role::Report).interim("AMP").unwrap().status_rejected.is_none());
}

#[test]
fn rejected_antibiotic_leaves_the_report() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    assert_eq!(analysis(&cluster, Role::Resistance).result.selection(), ["2", "3"]);

    reject(&mut cluster, &[lab.amp], "labman").unwrap();

    // AMP gained a "Not Tested" option, shifting CIP S from 3 to 4.
    let sensitivity = analysis(&cluster, Role::Resistance);
    assert_eq!(sensitivity.result_options[0].result_text, "Ampicillin: Not Tested");
    assert_eq!(sensitivity.result.selection(), ["4"]);
}

#[test]
fn rejected_values_survive_recalculation() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    reject(&mut cluster, &[lab.amp], "labman").unwrap();

    recalculate(&mut cluster, &analysis_id(Role::ZoneSize), &lab.setup).unwrap();
    recalculate(&mut cluster, &analysis_id(Role::BreakpointsTable), &lab.setup).unwrap();

    assert_eq!(value(&cluster, Role::Resistance, "AMP"), "-1");
    assert_eq!(value(&cluster, Role::DiskContent, "AMP"), "NT");
    assert_eq!(value(&cluster, Role::Resistance, "CIP"), "1");
    assert_eq!(analysis(&cluster, Role::Resistance).result.selection(), ["4"]);
}

#[test]
fn rejecting_twice_changes_nothing() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    reject(&mut cluster, &[lab.amp], "labman").unwrap();
    let before = cluster.clone().into_analyses();

    assert_eq!(reject(&mut cluster, &[lab.amp], "someone").unwrap(), 0);
    let after = cluster.into_analyses();
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.interim_fields, a.interim_fields);
    }
}

#[test]
fn submitted_analyses_are_flagged_too() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    analysis_mut(&mut cluster, Role::ZoneSize).review_state = ReviewState::ToBeVerified;

    assert_eq!(reject(&mut cluster, &[lab.amp], "labman").unwrap(), 5);
    assert_eq!(value(&cluster, Role::ZoneSize, "AMP"), "NT");
}

#[test]
fn rejection_reaches_a_submitted_category() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    analysis_mut(&mut cluster, Role::Resistance).review_state = ReviewState::ToBeVerified;

    reject(&mut cluster, &[lab.amp], "labman").unwrap();
    recalculate(&mut cluster, &analysis_id(Role::ZoneSize), &lab.setup).unwrap();

    assert_eq!(value(&cluster, Role::Resistance, "AMP"), "-1");
    assert_eq!(analysis(&cluster, Role::Resistance).result.selection(), ["4"]);
}

#[test]
fn rejecting_a_representative_flags_its_mirrors() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);

    // CIP in five analyses, LEV mirrored in zone and category.
    assert_eq!(reject(&mut cluster, &[lab.cip], "labman").unwrap(), 7);
    recalculate(&mut cluster, &analysis_id(Role::ZoneSize), &lab.setup).unwrap();

    let category = analysis(&cluster, Role::Resistance).interim("LEV").unwrap();
    assert_eq!(category.value, "-1");
    assert_eq!(category.choices.label("-1"), Some("Not Tested"));
    assert_eq!(category.status_rejected_by.as_deref(), Some("labman"));

    let zone = analysis(&cluster, Role::ZoneSize).interim("LEV").unwrap();
    assert_eq!(zone.value, "NT");
    assert_eq!(zone.result_type, "string");
    assert!(zone.is_rejected());

    let sensitivity = analysis(&cluster, Role::Resistance);
    let reported: Vec<&str> = sensitivity
        .result_options
        .iter()
        .filter(|o| sensitivity.result.selection().contains(&o.result_value))
        .map(|o| o.interim_keyword.as_str())
        .collect();
    assert_eq!(reported, ["AMP"]);
}

#[test]
fn duplicate_role_aborts_before_flagging() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    cluster
        .push(AnalysisRecord::new("retest", Role::ZoneSize, SAMPLE, ECOLI))
        .unwrap();
    let before = cluster.clone().into_analyses();

    let err = reject(&mut cluster, &[lab.amp], "labman").unwrap_err();
    assert!(matches!(
        err,
        CalcError::DuplicateRole {
            role: Role::ZoneSize,
            ..
        }
    ));
    assert_eq!(cluster.into_analyses(), before);
}

#[test]
fn rejected_mirror_keeps_not_tested() {
    let lab = lab();
    let mut cluster = reported_cluster(&lab);
    assert_eq!(value(&cluster, Role::Resistance, "LEV"), "1");

    reject(&mut cluster, &[lab.lev], "labman").unwrap();
    enter(&mut cluster, Role::ZoneSize, "CIP", "10");
    recalculate(&mut cluster, &analysis_id(Role::ZoneSize), &lab.setup).unwrap();

    assert_eq!(value(&cluster, Role::Resistance, "CIP"), "3");
    assert_eq!(value(&cluster, Role::Resistance, "LEV"), "-1");
    assert_eq!(value(&cluster, Role::ZoneSize, "LEV"), "NT");
}
