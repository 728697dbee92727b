//! abx-audit
//!
//! Audit trail events for analysis mutations and scoped suspension of
//! auditing for internal, non user-initiated writes.

pub mod events;
pub mod suspend;

pub use crate::events::{AuditAction, AuditEvent};
pub use crate::suspend::{AuditSuspension, suspend};
