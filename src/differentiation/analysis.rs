//! differentiation::analysis — derived estimates over raw computations.
//!
//! Purpose
//! -------
//! Define the pluggable analysis capability: an analysis consumes one
//! direction's raw computations and emits zero or more derived estimates
//! that join the same pool the success evaluator cross-checks. The
//! reference analysis, [`ApproximateCentral`], synthesizes a central
//! estimate from a forward/backward pair sharing a step size.
//!
//! Key behaviors
//! -------------
//! - Expose the [`Analysis`] trait: `id` plus
//!   `derive(&[ComputerResult]) -> Vec<AnalysisResult>`.
//! - [`ApproximateCentral`] groups a direction's computations by size and,
//!   for each size holding both a forward and a backward estimate, emits
//!   one derived estimate equal to their arithmetic mean, tagged
//!   `"approximate_central"` and carrying that size.
//! - Groups missing either required method emit nothing; there is no
//!   partial or synthetic substitution.
//!
//! Invariants & assumptions
//! ------------------------
//! - Analyses never mutate the raw computations they consume; their
//!   outputs are appended after the raw sequence, in registration order.
//! - Sizes originate from the request's size list, so estimates from the
//!   same size compare bit-identically; grouping is by exact size bits.
//! - Analyses are independent and composable: a request may carry zero,
//!   one, or several, and none observes another's output.
//!
//! Downstream usage
//! ----------------
//! - The request entry point calls each registered analysis once per
//!   direction and extends the direction's derived-result sequence with
//!   the outputs.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the complete-pair case (including the exact
//!   averaging behavior), missing-method groups, multiple sizes, and the
//!   analysis id tag.
use crate::differentiation::{
    methods::MethodKind,
    types::{AnalysisResult, ComputerResult, Size},
};

/// Capability for deriving secondary estimates from raw computations.
///
/// Implementations receive the full ordered sequence of one direction's
/// [`ComputerResult`]s and return derived estimates that pool uniformly
/// with the raw ones during success evaluation.
pub trait Analysis {
    /// Stable identifier recorded on every emitted [`AnalysisResult`].
    fn id(&self) -> &str;

    /// Derive zero or more estimates from one direction's computations.
    fn derive(&self, computed: &[ComputerResult]) -> Vec<AnalysisResult>;
}

/// Central-difference estimate synthesized from a forward/backward pair.
///
/// For each step size at which both a forward and a backward raw estimate
/// exist, emits their arithmetic mean. Mathematically this equals the
/// central quotient `(f(x+h·d) − f(x−h·d))/(2h)` without spending further
/// function evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproximateCentral;

impl ApproximateCentral {
    pub const ID: &'static str = "approximate_central";
}

impl Analysis for ApproximateCentral {
    fn id(&self) -> &str {
        Self::ID
    }

    fn derive(&self, computed: &[ComputerResult]) -> Vec<AnalysisResult> {
        let mut derived = Vec::new();
        let mut seen: Vec<u64> = Vec::new();
        for result in computed {
            let key = result.size.to_bits();
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            let forward = find(computed, MethodKind::Forward, result.size);
            let backward = find(computed, MethodKind::Backward, result.size);
            if let (Some(forward), Some(backward)) = (forward, backward) {
                derived.push(AnalysisResult {
                    analysis: Self::ID.to_string(),
                    value: 0.5 * (forward.value + backward.value),
                    size: result.size,
                });
            }
        }
        derived
    }
}

/// First raw estimate matching a method at an exact size.
fn find(computed: &[ComputerResult], method: MethodKind, size: Size) -> Option<&ComputerResult> {
    computed
        .iter()
        .find(|r| r.method == method && r.size.to_bits() == size.to_bits())
}
