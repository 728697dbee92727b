use std::ops::{Deref, DerefMut};

use abx_core::AstAnalysis;

/// Guard that keeps auditing disabled on an analysis while alive.
///
/// Dropping the guard restores the flag the analysis had before, so only
/// the writes made through the guard escape the audit trail.
pub struct AuditSuspension<'a, A: AstAnalysis + ?Sized> {
    analysis: &'a mut A,
    previous: bool,
}

/// Suspend auditing of `analysis` until the returned guard is dropped.
pub fn suspend<A: AstAnalysis + ?Sized>(analysis: &mut A) -> AuditSuspension<'_, A> {
    let previous = analysis.is_auditable();
    analysis.set_auditable(false);
    AuditSuspension { analysis, previous }
}

impl<A: AstAnalysis + ?Sized> Deref for AuditSuspension<'_, A> {
    type Target = A;

    fn deref(&self) -> &A {
        self.analysis
    }
}

impl<A: AstAnalysis + ?Sized> DerefMut for AuditSuspension<'_, A> {
    fn deref_mut(&mut self) -> &mut A {
        self.analysis
    }
}

impl<A: AstAnalysis + ?Sized> Drop for AuditSuspension<'_, A> {
    fn drop(&mut self) {
        self.analysis.set_auditable(self.previous);
    }
}
