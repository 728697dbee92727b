use std::collections::HashMap;
use std::path::Path;

use eyre::{WrapErr, eyre};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use abx_breakpoints::Setup;
use abx_calc::{AnalysisRecord, CalcError, Cluster, ClusterIndex, ClusterKey};

use crate::config::write_atomic;

/// Setup objects plus the analyses of one or more samples, as exchanged
/// with the host platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub setup: Setup,
    #[serde(default)]
    pub analyses: Vec<AnalysisRecord>,
}

impl Workbook {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read workbook at {}", path.display()))?;
        let workbook: Workbook = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("invalid workbook at {}", path.display()))?;
        workbook.setup.validate()?;
        tracing::debug!(
            path = %path.display(),
            analyses = workbook.analyses.len(),
            "workbook loaded"
        );
        Ok(workbook)
    }

    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, json.as_bytes())?;
        tracing::info!(path = %path.display(), "workbook saved");
        Ok(())
    }

    /// Attribute audit events of every analysis to `actor`.
    pub fn set_actor(&mut self, actor: &str) {
        for analysis in &mut self.analyses {
            analysis.actor = actor.to_string();
        }
    }

    /// Antibiotic uids for the given abbreviations.
    pub fn antibiotic_uids(&self, abbreviations: &[String]) -> eyre::Result<Vec<Uuid>> {
        abbreviations
            .iter()
            .map(|abbreviation| {
                self.setup
                    .antibiotic_by_abbreviation(abbreviation)
                    .map(|a| a.uid)
                    .ok_or_else(|| eyre!("unknown antibiotic: {abbreviation}"))
            })
            .collect()
    }

    /// Run `f` on the cluster with `key`, then write the analyses back in
    /// their original order.
    pub fn with_cluster<T>(
        &mut self,
        key: &ClusterKey,
        f: impl FnOnce(&mut Cluster<AnalysisRecord>, &Setup) -> Result<T, CalcError>,
    ) -> eyre::Result<T> {
        self.with_index(|index, setup| {
            let cluster = index
                .get_mut(key)
                .ok_or_else(|| eyre!("no AST analyses for {key}"))?;
            Ok(f(cluster, setup)?)
        })
    }

    /// Run `f` on the cluster holding the analysis `id`.
    pub fn with_cluster_of<T>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Cluster<AnalysisRecord>, &Setup) -> Result<T, CalcError>,
    ) -> eyre::Result<T> {
        self.with_index(|index, setup| {
            let cluster = index
                .cluster_of(id)
                .ok_or_else(|| eyre!("analysis '{id}' is not part of an AST cluster"))?;
            Ok(f(cluster, setup)?)
        })
    }

    fn with_index<T>(
        &mut self,
        f: impl FnOnce(&mut ClusterIndex<AnalysisRecord>, &Setup) -> eyre::Result<T>,
    ) -> eyre::Result<T> {
        let order: HashMap<String, usize> = self
            .analyses
            .iter()
            .enumerate()
            .map(|(i, a)| (a.id.clone(), i))
            .collect();

        let (mut index, skipped) = ClusterIndex::from_analyses(std::mem::take(&mut self.analyses));
        let outcome = f(&mut index, &self.setup);

        let mut analyses = index.into_analyses();
        analyses.extend(skipped);
        analyses.sort_by_key(|a| order.get(&a.id).copied().unwrap_or(usize::MAX));
        self.analyses = analyses;
        outcome
    }

    /// Analyses of the cluster with `key`, in workbook order.
    pub fn cluster(&self, key: &ClusterKey) -> Vec<&AnalysisRecord> {
        self.analyses
            .iter()
            .filter(|a| a.sample_id == key.sample_id && a.microorganism == key.microorganism)
            .collect()
    }
}
