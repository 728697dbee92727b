//! abx-breakpoints
//!
//! Clinical breakpoint resolution and sensitivity classification. Pure
//! functions over setup data; no analysis state is read or written here.

pub mod classify;
pub mod error;
pub mod resolve;
pub mod setup;

pub use crate::classify::{Method, SensitivityCategory, classify, classify_to_code};
pub use crate::error::BreakpointError;
pub use crate::resolve::{resolve_breakpoint, selected_table};
pub use crate::setup::{Setup, SetupCatalog};
