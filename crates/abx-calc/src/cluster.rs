use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use abx_core::{AstAnalysis, Role};

use crate::error::CalcError;

/// Identity of a cluster: one sample, one microorganism.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClusterKey {
    pub sample_id: String,
    pub microorganism: String,
}

impl ClusterKey {
    pub fn new(sample_id: impl Into<String>, microorganism: impl Into<String>) -> Self {
        Self {
            sample_id: sample_id.into(),
            microorganism: microorganism.into(),
        }
    }

    pub fn of<A: AstAnalysis + ?Sized>(analysis: &A) -> Self {
        Self::new(analysis.sample_id(), analysis.microorganism())
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sample_id, self.microorganism)
    }
}

/// The AST analyses of one sample and microorganism, owned together.
#[derive(Debug, Clone)]
pub struct Cluster<A> {
    key: ClusterKey,
    analyses: Vec<A>,
}

impl<A: AstAnalysis> Cluster<A> {
    pub fn new(key: ClusterKey) -> Self {
        Self {
            key,
            analyses: Vec::new(),
        }
    }

    /// Build a cluster from analyses that must all share `key`.
    pub fn from_analyses(key: ClusterKey, analyses: Vec<A>) -> Result<Self, CalcError> {
        let mut cluster = Self::new(key);
        for analysis in analyses {
            cluster.push(analysis)?;
        }
        Ok(cluster)
    }

    pub fn key(&self) -> &ClusterKey {
        &self.key
    }

    pub fn push(&mut self, analysis: A) -> Result<(), CalcError> {
        if ClusterKey::of(&analysis) != self.key {
            return Err(CalcError::ForeignAnalysis {
                analysis: analysis.id().to_string(),
                sample_id: self.key.sample_id.clone(),
                microorganism: self.key.microorganism.clone(),
            });
        }
        self.analyses.push(analysis);
        Ok(())
    }

    pub fn analyses(&self) -> &[A] {
        &self.analyses
    }

    pub fn analyses_mut(&mut self) -> &mut [A] {
        &mut self.analyses
    }

    pub fn into_analyses(self) -> Vec<A> {
        self.analyses
    }

    pub fn find(&self, id: &str) -> Option<&A> {
        self.analyses.iter().find(|a| a.id() == id)
    }

    /// Index the valid analyses of this cluster by role.
    ///
    /// Cancelled, retracted and rejected analyses are left out. Two valid
    /// analyses with the same role mean the cluster is corrupted.
    pub fn group(&mut self) -> Result<AstGroup<'_, A>, CalcError> {
        let mut roles = BTreeMap::new();
        for (index, analysis) in self.analyses.iter().enumerate() {
            if !analysis.review_state().is_valid() {
                continue;
            }
            let Some(role) = analysis.role() else {
                continue;
            };
            if roles.insert(role, index).is_some() {
                return Err(CalcError::DuplicateRole {
                    role,
                    sample_id: self.key.sample_id.clone(),
                    microorganism: self.key.microorganism.clone(),
                });
            }
        }

        Ok(AstGroup {
            key: &self.key,
            analyses: &mut self.analyses,
            roles,
        })
    }
}

/// Role-keyed view over the valid analyses of a cluster.
pub struct AstGroup<'a, A> {
    key: &'a ClusterKey,
    analyses: &'a mut [A],
    roles: BTreeMap<Role, usize>,
}

impl<A: AstAnalysis> AstGroup<'_, A> {
    pub fn key(&self) -> &ClusterKey {
        self.key
    }

    pub fn get(&self, role: Role) -> Option<&A> {
        self.roles.get(&role).map(|&i| &self.analyses[i])
    }

    pub fn get_mut(&mut self, role: Role) -> Option<&mut A> {
        self.roles.get(&role).map(|&i| &mut self.analyses[i])
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains_key(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.keys().copied()
    }
}

/// Explicit index of clusters, built from the analyses of one or more
/// samples.
#[derive(Debug, Clone)]
pub struct ClusterIndex<A> {
    clusters: BTreeMap<ClusterKey, Cluster<A>>,
}

impl<A: AstAnalysis> Default for ClusterIndex<A> {
    fn default() -> Self {
        Self {
            clusters: BTreeMap::new(),
        }
    }
}

impl<A: AstAnalysis> ClusterIndex<A> {
    /// Group analyses by sample and microorganism. Analyses whose keyword is
    /// not an AST role, and sample-level identification analyses, are not
    /// indexed and are returned back.
    pub fn from_analyses(analyses: impl IntoIterator<Item = A>) -> (Self, Vec<A>) {
        let mut index = Self::default();
        let mut skipped = Vec::new();
        for analysis in analyses {
            match analysis.role() {
                Some(Role::Identification) | None => skipped.push(analysis),
                Some(_) => index.insert(analysis),
            }
        }
        (index, skipped)
    }

    pub fn insert(&mut self, analysis: A) {
        let key = ClusterKey::of(&analysis);
        self.clusters
            .entry(key.clone())
            .or_insert_with(|| Cluster::new(key))
            .analyses
            .push(analysis);
    }

    pub fn get(&self, key: &ClusterKey) -> Option<&Cluster<A>> {
        self.clusters.get(key)
    }

    pub fn get_mut(&mut self, key: &ClusterKey) -> Option<&mut Cluster<A>> {
        self.clusters.get_mut(key)
    }

    /// The cluster holding the analysis with `id`.
    pub fn cluster_of(&mut self, id: &str) -> Option<&mut Cluster<A>> {
        self.clusters
            .values_mut()
            .find(|cluster| cluster.find(id).is_some())
    }

    pub fn clusters(&self) -> impl Iterator<Item = &Cluster<A>> {
        self.clusters.values()
    }

    pub fn clusters_mut(&mut self) -> impl Iterator<Item = &mut Cluster<A>> {
        self.clusters.values_mut()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn into_analyses(self) -> Vec<A> {
        self.clusters
            .into_values()
            .flat_map(Cluster::into_analyses)
            .collect()
    }
}
