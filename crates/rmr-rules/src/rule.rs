//! Rule trait
use crate::scope::RuleScope;
use rmr_core::Triplet;

/// One governed transformation rule.
///
/// Evaluation reads the triplet and writes only to the scope: records go
/// there, and so do the flags, which the registry merges into the triplet
/// afterwards. Rules never depend on each other's outcome.
pub trait Rule: Send + Sync {
    /// Stable rule code, e.g. `"6a"`
    fn code(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn evaluate(&self, triplet: &Triplet, scope: &mut RuleScope);
}
