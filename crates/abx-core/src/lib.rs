//! abx-core
//!
//! Pure domain types for antibiotic sensitivity testing: setup objects
//! (antibiotics, microorganisms, breakpoints tables), interim fields, choice
//! vocabularies, analysis roles and the accessor trait the host platform
//! implements for its persisted analyses. No calculation logic lives here.

pub mod error;
pub mod keywords;
pub mod models;

pub use crate::error::CoreError;
pub use crate::models::analysis::{AnalysisResult, AstAnalysis, ReviewState, Role};
pub use crate::models::choices::{Choice, Choices};
pub use crate::models::interim::InterimField;
pub use crate::models::result_option::ResultOption;
