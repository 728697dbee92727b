#![allow(dead_code)]

use abx_breakpoints::Setup;
use abx_calc::{AnalysisRecord, Cluster, ClusterKey, update_cluster_antibiotics};
use abx_core::models::antibiotic::Antibiotic;
use abx_core::models::breakpoint::{Breakpoint, BreakpointsTable};
use abx_core::models::microorganism::Microorganism;
use abx_core::{AstAnalysis, Role};
use uuid::Uuid;

pub const SAMPLE: &str = "H2O-0001";
pub const ECOLI: &str = "Escherichia coli";

/// AST roles a cluster is built with, identification excluded.
pub const ROLES: [Role; 7] = [
    Role::BreakpointsTable,
    Role::ZoneSize,
    Role::MicValue,
    Role::DiskContent,
    Role::Resistance,
    Role::Report,
    Role::ReportExtrapolated,
];

pub struct Lab {
    pub setup: Setup,
    pub amp: Uuid,
    pub cip: Uuid,
    /// Extrapolated from CIP.
    pub lev: Uuid,
    pub table: Uuid,
}

pub fn lab() -> Lab {
    let amp = Uuid::new_v4();
    let cip = Uuid::new_v4();
    let lev = Uuid::new_v4();
    let table = Uuid::new_v4();
    let ecoli = Uuid::new_v4();

    let setup = Setup {
        antibiotics: vec![
            Antibiotic::new(amp, "AMP", "Ampicillin"),
            Antibiotic::new(cip, "CIP", "Ciprofloxacin").with_extrapolated(vec![lev]),
            Antibiotic::new(lev, "LEV", "Levofloxacin"),
        ],
        microorganisms: vec![Microorganism {
            uid: ecoli,
            name: ECOLI.to_string(),
            category: None,
            multi_resistant: false,
            active: true,
        }],
        breakpoints_tables: vec![BreakpointsTable {
            uid: table,
            title: "EUCAST 2022".to_string(),
            description: None,
            breakpoints: vec![
                Breakpoint::new(amp, ecoli)
                    .with_diameters(17.0, 13.0)
                    .with_disk_content(10.0),
                Breakpoint::new(cip, ecoli)
                    .with_diameters(21.0, 15.0)
                    .with_mics(0.25, 0.5)
                    .with_disk_content(5.0),
            ],
        }],
    };
    setup.validate().unwrap();

    Lab {
        setup,
        amp,
        cip,
        lev,
        table,
    }
}

pub fn analysis_id(role: Role) -> String {
    format!("{}-1", role.keyword())
}

impl Lab {
    /// A cluster with one analysis per role, AMP and CIP assigned.
    pub fn cluster(&self) -> Cluster<AnalysisRecord> {
        self.cluster_with(&ROLES)
    }

    pub fn cluster_with(&self, roles: &[Role]) -> Cluster<AnalysisRecord> {
        let analyses = roles
            .iter()
            .map(|&role| AnalysisRecord::new(analysis_id(role), role, SAMPLE, ECOLI))
            .collect();
        let mut cluster = Cluster::from_analyses(ClusterKey::new(SAMPLE, ECOLI), analyses).unwrap();
        update_cluster_antibiotics(&mut cluster, &[self.amp, self.cip], &self.setup).unwrap();
        cluster
    }
}

pub fn analysis(cluster: &Cluster<AnalysisRecord>, role: Role) -> &AnalysisRecord {
    cluster.find(&analysis_id(role)).unwrap()
}

pub fn analysis_mut(cluster: &mut Cluster<AnalysisRecord>, role: Role) -> &mut AnalysisRecord {
    let id = analysis_id(role);
    cluster
        .analyses_mut()
        .iter_mut()
        .find(|a| a.id == id)
        .unwrap()
}

/// Value of the interim field `keyword` of the analysis with `role`.
pub fn value(cluster: &Cluster<AnalysisRecord>, role: Role, keyword: &str) -> String {
    analysis(cluster, role).interim(keyword).unwrap().value.clone()
}

/// Enter a value the way a user would, through the analysis setter.
pub fn enter(cluster: &mut Cluster<AnalysisRecord>, role: Role, keyword: &str, value: &str) {
    let analysis = analysis_mut(cluster, role);
    let mut fields = analysis.interim_fields();
    let field = fields.iter_mut().find(|f| f.keyword == keyword).unwrap();
    field.value = value.to_string();
    analysis.set_interim_fields(fields);
}
