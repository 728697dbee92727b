mod common;

use abx_audit::AuditAction;
use abx_calc::{AnalysisRecord, CalcError, build_interims, update_antibiotics};
use abx_core::{AstAnalysis, ReviewState, Role};
use common::{ECOLI, SAMPLE, analysis, lab};
use uuid::Uuid;

fn keywords(role: Role, antibiotics: &[Uuid], lab: &common::Lab) -> Vec<String> {
    build_interims(role, antibiotics, &lab.setup)
        .unwrap()
        .into_iter()
        .map(|f| f.keyword)
        .collect()
}

#[test]
fn mirrors_follow_their_representative() {
    let lab = lab();
    let antibiotics = [lab.cip, lab.amp];
    assert_eq!(keywords(Role::ZoneSize, &antibiotics, &lab), ["CIP", "LEV", "AMP"]);
    assert_eq!(keywords(Role::Resistance, &antibiotics, &lab), ["CIP", "LEV", "AMP"]);
    assert_eq!(keywords(Role::Report, &antibiotics, &lab), ["CIP", "LEV", "AMP"]);
    assert_eq!(keywords(Role::MicValue, &antibiotics, &lab), ["CIP", "AMP"]);
    assert_eq!(keywords(Role::BreakpointsTable, &antibiotics, &lab), ["CIP", "AMP"]);

    let fields = build_interims(Role::Resistance, &antibiotics, &lab.setup).unwrap();
    assert_eq!(fields[1].primary, Some(lab.cip));
    assert_eq!(fields[1].full_title.as_deref(), Some("Levofloxacin"));
}

#[test]
fn explicitly_selected_antibiotic_is_not_mirrored() {
    let lab = lab();
    let fields = build_interims(Role::ZoneSize, &[lab.cip, lab.lev], &lab.setup).unwrap();
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.primary.is_none()));
}

#[test]
fn interims_carry_role_vocabulary() {
    let lab = lab();
    let fields = build_interims(Role::Resistance, &[lab.amp], &lab.setup).unwrap();
    assert_eq!(fields[0].choices.to_string(), "0:|1:S|2:I|3:R");
    assert_eq!(fields[0].result_type, "select");
    assert_eq!(fields[0].size, "1");

    let fields = build_interims(Role::BreakpointsTable, &[lab.amp], &lab.setup).unwrap();
    assert_eq!(
        fields[0].choices.to_string(),
        format!("0:|{}:EUCAST 2022", lab.table)
    );

    let fields = build_interims(Role::ZoneSize, &[lab.amp], &lab.setup).unwrap();
    assert!(!fields[0].is_choice());
}

#[test]
fn extrapolated_reporting_lists_mirrors_per_representative() {
    let lab = lab();
    let fields = build_interims(Role::ReportExtrapolated, &[lab.amp, lab.cip], &lab.setup).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].keyword, "CIP");
    assert_eq!(fields[0].choices.to_string(), format!("{}:LEV", lab.lev));
    assert_eq!(fields[0].result_type, "multichoice");
}

#[test]
fn unknown_antibiotic_is_an_error() {
    let lab = lab();
    let ghost = Uuid::new_v4();
    let err = build_interims(Role::ZoneSize, &[ghost], &lab.setup).unwrap_err();
    assert!(matches!(err, CalcError::UnknownAntibiotic(uid) if uid == ghost));
}

#[test]
fn new_antibiotics_keep_existing_values() {
    let lab = lab();
    let mut record = AnalysisRecord::new("zone", Role::ZoneSize, SAMPLE, ECOLI).with_interim_fields(
        build_interims(Role::ZoneSize, &[lab.amp], &lab.setup)
            .unwrap()
            .into_iter()
            .map(|f| f.with_value("18"))
            .collect(),
    );

    let interims = build_interims(Role::ZoneSize, &[lab.amp, lab.cip], &lab.setup).unwrap();
    assert!(update_antibiotics(&mut record, interims).unwrap());

    assert_eq!(record.interim("AMP").unwrap().value, "18");
    assert_eq!(record.interim("CIP").unwrap().value, "");
    assert!(record.interim("LEV").unwrap().is_extrapolated());
}

#[test]
fn nothing_new_is_a_no_op() {
    let lab = lab();
    let cluster = lab.cluster();
    let mut record = analysis(&cluster, Role::ZoneSize).clone();
    let interims = build_interims(Role::ZoneSize, &[lab.amp], &lab.setup).unwrap();

    assert!(!update_antibiotics(&mut record, interims).unwrap());
    assert_eq!(record.interim_fields().len(), 3);
}

#[test]
fn submitted_analysis_is_retracted_first() {
    let lab = lab();
    let mut record = AnalysisRecord::new("zone", Role::ZoneSize, SAMPLE, ECOLI)
        .with_review_state(ReviewState::ToBeVerified);

    let interims = build_interims(Role::ZoneSize, &[lab.amp], &lab.setup).unwrap();
    assert!(update_antibiotics(&mut record, interims).unwrap());
    assert_eq!(record.review_state, ReviewState::Assigned);
    assert!(
        record
            .audit_log
            .iter()
            .any(|event| event.action == AuditAction::Retracted)
    );
}

#[test]
fn verified_analysis_is_left_alone() {
    let lab = lab();
    let mut record = AnalysisRecord::new("zone", Role::ZoneSize, SAMPLE, ECOLI)
        .with_review_state(ReviewState::Verified);

    let interims = build_interims(Role::ZoneSize, &[lab.amp], &lab.setup).unwrap();
    assert!(!update_antibiotics(&mut record, interims).unwrap());
    assert!(record.interim_fields.is_empty());
    assert_eq!(record.review_state, ReviewState::Verified);
}

#[test]
fn result_options_follow_assignment() {
    let lab = lab();
    let cluster = lab.cluster();
    let options = &analysis(&cluster, Role::Resistance).result_options;

    assert_eq!(options.len(), 9);
    assert_eq!(options[0].result_text, "Ampicillin: S");
    assert_eq!(options[0].result_value, "0");
    assert_eq!(options[5].result_text, "Ciprofloxacin: R");
    assert_eq!(options[5].interim_keyword, "CIP");
    assert_eq!(options[5].interim_value, "3");
}
