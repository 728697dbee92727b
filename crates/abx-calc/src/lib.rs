//! abx-calc
//!
//! Cross-analysis calculations of an AST cluster: the analyses sharing one
//! sample and one microorganism.
//!
//! Public API:
//! - `recalculate()` runs after a result of one analysis changes: disk
//!   doses, sensitivity categories, extrapolated mirrors, reportable result
//! - `reject()` flags antibiotics as "Not Tested" across a cluster
//! - `update_cluster_antibiotics()` re-assigns the antibiotics of a cluster
//! - `ClusterIndex` groups a flat list of analyses into clusters

pub mod assign;
pub mod cluster;
pub mod error;
pub mod options;
pub mod orchestrate;
pub mod propagate;
pub mod record;
pub mod reject;
pub mod report;

pub use crate::assign::{build_interims, update_antibiotics, update_cluster_antibiotics};
pub use crate::cluster::{AstGroup, Cluster, ClusterIndex, ClusterKey};
pub use crate::error::CalcError;
pub use crate::options::{identification_options, result_options};
pub use crate::orchestrate::recalculate;
pub use crate::propagate::{propagate_analysis, propagate_extrapolated};
pub use crate::record::AnalysisRecord;
pub use crate::reject::reject;
pub use crate::report::{reportable_antibiotics, update_sensitivity_result};
