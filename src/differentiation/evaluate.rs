//! differentiation::evaluate — success policies over pooled estimates.
//!
//! Purpose
//! -------
//! Decide, per direction, whether the pooled raw and derived estimates
//! agree well enough to accept a single derivative value — without ever
//! comparing against a known ground truth. Heterogeneous estimators
//! (different step sizes, different stencils, derived analyses)
//! cross-validate each other through a tolerance-based equivalence check.
//!
//! Key behaviors
//! -------------
//! - Expose the [`SuccessEvaluator`] capability:
//!   `evaluate(direction, pooled estimates) -> Evaluation`.
//! - The reference policy, [`Consistency`], partitions the pool into
//!   groups keyed by step size (the default [`GroupKey`]; grouping by
//!   producing source is available), requires every pair inside a group to
//!   agree within `atol + rtol·max(|a|, |b|)`, takes each consistent
//!   group's mean as its representative, and accepts the mean of the
//!   representatives only when they in turn all agree pairwise under the
//!   same tolerance.
//! - A group of size one is trivially consistent. Internally inconsistent
//!   groups are excluded from the representative pool; the direction
//!   fails only when that pool is empty or disagrees with itself. The
//!   policy never averages across known-inconsistent estimates.
//!
//! Invariants & assumptions
//! ------------------------
//! - An inconsistent direction is a normal, reportable outcome
//!   (`success = false`, `value = None`), never an error; evaluation
//!   errors have already aborted the request upstream.
//! - All pooled estimates are finite: the computer rejects non-finite
//!   evaluations and quotients before they can reach a pool.
//! - Tolerances are validated on construction ([`ConsistencyTolerances`])
//!   and non-negative; `atol = rtol = 0` degenerates to exact equality.
//!
//! Conventions
//! -----------
//! - The comparison is all-pairs and symmetric, both inside groups and
//!   across group representatives, so the outcome does not depend on
//!   estimate order.
//! - Size-keyed grouping compares exact size bits; sizes originate from
//!   the request's size list, so equal sizes compare bit-identically.
//!
//! Downstream usage
//! ----------------
//! - The request entry point pools each direction's raw and derived
//!   estimates as `&dyn Estimate` and passes them to the configured
//!   evaluator; the returned [`Evaluation`] becomes the direction's
//!   success flag and accepted value.
//! - Alternative policies implement [`SuccessEvaluator`] and plug in
//!   without touching the orchestrator.
//!
//! Testing notes
//! -------------
//! - Unit tests cover trivial single-estimate acceptance, intra-group
//!   rejection, representative-level rejection across groups, exclusion
//!   of an internally inconsistent group, the empty pool, and tolerance
//!   validation.
use crate::differentiation::{
    directions::Direction,
    errors::{DiffError, DiffResult},
    types::{Estimate, Value, DEFAULT_ATOL, DEFAULT_RTOL},
};

/// Validated absolute/relative tolerances for the consistency check.
///
/// Two estimates `a` and `b` agree when
/// `|a − b| ≤ atol + rtol·max(|a|, |b|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsistencyTolerances {
    pub atol: f64,
    pub rtol: f64,
}

impl ConsistencyTolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - Both tolerances must be **finite** and **non-negative**.
    /// - Zero is allowed for either (or both, degenerating to exact
    ///   equality).
    ///
    /// # Errors
    /// - [`DiffError::InvalidAtol`] / [`DiffError::InvalidRtol`] for
    ///   non-finite or negative values.
    pub fn new(atol: f64, rtol: f64) -> DiffResult<Self> {
        if !atol.is_finite() {
            return Err(DiffError::InvalidAtol { value: atol, reason: "Tolerance must be finite." });
        }
        if atol < 0.0 {
            return Err(DiffError::InvalidAtol {
                value: atol,
                reason: "Tolerance must be non-negative.",
            });
        }
        if !rtol.is_finite() {
            return Err(DiffError::InvalidRtol { value: rtol, reason: "Tolerance must be finite." });
        }
        if rtol < 0.0 {
            return Err(DiffError::InvalidRtol {
                value: rtol,
                reason: "Tolerance must be non-negative.",
            });
        }
        Ok(Self { atol, rtol })
    }
}

impl Default for ConsistencyTolerances {
    fn default() -> Self {
        Self { atol: DEFAULT_ATOL, rtol: DEFAULT_RTOL }
    }
}

/// Per-direction outcome of a success evaluation.
///
/// `value` is `Some` exactly when `success` is true; a failed direction
/// never carries a best-guess value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub success: bool,
    pub value: Option<Value>,
}

impl Evaluation {
    fn failed() -> Self {
        Self { success: false, value: None }
    }

    fn accepted(value: Value) -> Self {
        Self { success: true, value: Some(value) }
    }
}

/// Capability for deciding a direction's overall success and value from
/// its pooled raw and derived estimates.
pub trait SuccessEvaluator {
    fn evaluate(&self, direction: &Direction, estimates: &[&dyn Estimate]) -> Evaluation;
}

/// Grouping key for the consistency partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// One group per distinct step size (the default).
    Size,
    /// One group per producing method/analysis label.
    Source,
}

/// The reference consistency policy (tolerance-keyed equivalence classes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consistency {
    pub tols: ConsistencyTolerances,
    pub group_key: GroupKey,
}

impl Consistency {
    /// Consistency with the default size-keyed grouping.
    pub fn new(tols: ConsistencyTolerances) -> Self {
        Self { tols, group_key: GroupKey::Size }
    }

    /// Override the grouping key.
    pub fn with_group_key(mut self, group_key: GroupKey) -> Self {
        self.group_key = group_key;
        self
    }
}

impl Default for Consistency {
    fn default() -> Self {
        Self::new(ConsistencyTolerances::default())
    }
}

impl SuccessEvaluator for Consistency {
    /// evaluate — accept a direction's value only when its estimates
    /// cross-validate.
    ///
    /// # Behavior
    /// - Partition the pool into groups by the configured key (exact step
    ///   size by default), preserving first-appearance order.
    /// - Keep each group whose members all agree pairwise within
    ///   tolerance; its representative is the group mean.
    /// - Accept the mean of the representatives when they agree pairwise
    ///   under the same tolerance; otherwise report failure with no value.
    /// - An empty pool, or a pool with no internally consistent group,
    ///   fails.
    fn evaluate(&self, _direction: &Direction, estimates: &[&dyn Estimate]) -> Evaluation {
        let mut groups: Vec<(Key<'_>, Vec<Value>)> = Vec::new();
        for estimate in estimates {
            let key = match self.group_key {
                GroupKey::Size => Key::Bits(estimate.size().to_bits()),
                GroupKey::Source => Key::Label(estimate.label()),
            };
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, members)) => members.push(estimate.value()),
                None => groups.push((key, vec![estimate.value()])),
            }
        }

        let representatives: Vec<Value> = groups
            .iter()
            .filter(|(_, members)| mutually_consistent(members, &self.tols))
            .map(|(_, members)| mean(members))
            .collect();

        if representatives.is_empty() {
            return Evaluation::failed();
        }
        if !mutually_consistent(&representatives, &self.tols) {
            return Evaluation::failed();
        }
        Evaluation::accepted(mean(&representatives))
    }
}

/// Partition key for one equivalence-class group.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Key<'a> {
    Bits(u64),
    Label(&'a str),
}

/// Whether two estimates agree within `atol + rtol·max(|a|, |b|)`.
pub fn within_tolerance(a: Value, b: Value, tols: &ConsistencyTolerances) -> bool {
    (a - b).abs() <= tols.atol + tols.rtol * a.abs().max(b.abs())
}

/// All-pairs agreement; a singleton (or empty) slice is trivially
/// consistent.
fn mutually_consistent(values: &[Value], tols: &ConsistencyTolerances) -> bool {
    for (i, &a) in values.iter().enumerate() {
        for &b in &values[i + 1..] {
            if !within_tolerance(a, b, tols) {
                return false;
            }
        }
    }
    true
}

fn mean(values: &[Value]) -> Value {
    values.iter().sum::<Value>() / values.len() as Value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differentiation::methods::MethodKind;
    use crate::differentiation::types::{AnalysisResult, ComputerResult};
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Tolerance construction and the pairwise agreement predicate.
    // - Trivial acceptance of a single estimate.
    // - Intra-group inconsistency and representative-level inconsistency.
    // - Exclusion of an internally inconsistent group from the pool.
    // - Uniform pooling of raw and derived estimates.
    //
    // They intentionally DO NOT cover:
    // - How pools are assembled per direction (api / integration tests).
    // -------------------------------------------------------------------------

    fn direction() -> Direction {
        Direction::new("x0", array![1.0])
    }

    fn raw(value: f64, size: f64) -> ComputerResult {
        ComputerResult { method: MethodKind::Forward, value, size }
    }

    fn evaluate(estimates: &[&dyn Estimate], atol: f64, rtol: f64) -> Evaluation {
        let policy = Consistency::new(ConsistencyTolerances::new(atol, rtol).unwrap());
        policy.evaluate(&direction(), estimates)
    }

    #[test]
    // Purpose
    // -------
    // Verify tolerance validation: negative or non-finite values are
    // rejected, zero is allowed.
    fn tolerances_are_validated_on_construction() {
        assert!(ConsistencyTolerances::new(0.0, 0.0).is_ok());
        assert!(matches!(
            ConsistencyTolerances::new(-1e-9, 1e-2),
            Err(DiffError::InvalidAtol { .. })
        ));
        assert!(matches!(
            ConsistencyTolerances::new(1e-9, f64::NAN),
            Err(DiffError::InvalidRtol { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Exercise the agreement predicate on both sides of the threshold.
    fn within_tolerance_combines_absolute_and_relative_terms() {
        let tols = ConsistencyTolerances::new(1e-12, 1e-2).unwrap();
        // Relative term dominates at large magnitudes.
        assert!(within_tolerance(400.0, 399.0, &tols));
        assert!(!within_tolerance(400.0, 390.0, &tols));
        // Absolute term dominates near zero.
        assert!(within_tolerance(0.0, 5e-13, &tols));
        assert!(!within_tolerance(0.0, 1e-9, &tols));
    }

    #[test]
    // Purpose
    // -------
    // A single estimate forms a singleton group and a singleton
    // representative pool: trivially consistent, accepted as-is.
    fn single_estimate_is_trivially_consistent() {
        // Arrange
        let only = raw(3.25, 1e-6);
        let pool: Vec<&dyn Estimate> = vec![&only];

        // Act
        let evaluation = evaluate(&pool, 1e-12, 1e-2);

        // Assert
        assert_eq!(evaluation, Evaluation { success: true, value: Some(3.25) });
    }

    #[test]
    // Purpose
    // -------
    // Two groups, each internally consistent, whose representatives differ by
    // more than the tolerance: the direction fails with no value.
    //
    // Given
    // -----
    // - Group at size 1e-3 with values {100.0, 100.1}.
    // - Group at size 1e-6 with values {200.0, 200.1}.
    //
    // Expect
    // ------
    // - success = false, value = None (never an average of 100 and 200).
    fn disagreeing_representatives_fail() {
        // Arrange
        let a1 = raw(100.0, 1e-3);
        let a2 = raw(100.1, 1e-3);
        let b1 = raw(200.0, 1e-6);
        let b2 = raw(200.1, 1e-6);
        let pool: Vec<&dyn Estimate> = vec![&a1, &a2, &b1, &b2];

        // Act
        let evaluation = evaluate(&pool, 1e-12, 1e-2);

        // Assert
        assert_eq!(evaluation, Evaluation { success: false, value: None });
    }

    #[test]
    // Purpose
    // -------
    // An internally inconsistent group is excluded from the representative
    // pool; the remaining consistent group still carries the direction.
    //
    // Given
    // -----
    // - Group at size 1e-3 with values {1.0, 5.0} (inconsistent).
    // - Group at size 1e-6 with values {2.0, 2.01} (consistent).
    //
    // Expect
    // ------
    // - success = true, value = mean(2.0, 2.01) = 2.005.
    fn inconsistent_group_is_excluded_not_fatal() {
        // Arrange
        let noisy1 = raw(1.0, 1e-3);
        let noisy2 = raw(5.0, 1e-3);
        let good1 = raw(2.0, 1e-6);
        let good2 = raw(2.01, 1e-6);
        let pool: Vec<&dyn Estimate> = vec![&noisy1, &noisy2, &good1, &good2];

        // Act
        let evaluation = evaluate(&pool, 1e-12, 1e-2);

        // Assert
        assert!(evaluation.success);
        assert_relative_eq!(evaluation.value.unwrap(), 2.005, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // When every group is internally inconsistent, the representative pool is
    // empty and the direction fails.
    fn all_groups_inconsistent_fail() {
        // Arrange
        let a1 = raw(1.0, 1e-3);
        let a2 = raw(-1.0, 1e-3);
        let b1 = raw(3.0, 1e-6);
        let b2 = raw(-3.0, 1e-6);
        let pool: Vec<&dyn Estimate> = vec![&a1, &a2, &b1, &b2];

        // Act
        let evaluation = evaluate(&pool, 1e-12, 1e-6);

        // Assert
        assert_eq!(evaluation, Evaluation { success: false, value: None });
    }

    #[test]
    // Purpose
    // -------
    // Source-keyed grouping partitions by producing label instead of size:
    // estimates from the same method at different sizes share a group.
    //
    // Given
    // -----
    // - Forward estimates {10.0, 10.05} and backward estimates
    //   {10.02, 10.07} across two sizes.
    //
    // Expect
    // ------
    // - Two groups (forward, backward), both consistent; accepted value is
    //   the mean of the two group means.
    fn source_grouping_partitions_by_label() {
        // Arrange
        let f1 = ComputerResult { method: MethodKind::Forward, value: 10.0, size: 1e-3 };
        let f2 = ComputerResult { method: MethodKind::Forward, value: 10.05, size: 1e-6 };
        let b1 = ComputerResult { method: MethodKind::Backward, value: 10.02, size: 1e-3 };
        let b2 = ComputerResult { method: MethodKind::Backward, value: 10.07, size: 1e-6 };
        let pool: Vec<&dyn Estimate> = vec![&f1, &f2, &b1, &b2];
        let policy = Consistency::new(ConsistencyTolerances::new(1e-12, 1e-2).unwrap())
            .with_group_key(GroupKey::Source);

        // Act
        let evaluation = policy.evaluate(&direction(), &pool);

        // Assert
        assert!(evaluation.success);
        assert_relative_eq!(evaluation.value.unwrap(), 10.035, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // An empty pool fails rather than inventing a value.
    fn empty_pool_fails() {
        let pool: Vec<&dyn Estimate> = Vec::new();
        let evaluation = evaluate(&pool, 1e-12, 1e-2);
        assert_eq!(evaluation, Evaluation { success: false, value: None });
    }

    #[test]
    // Purpose
    // -------
    // Raw and derived estimates pool uniformly: a derived estimate joins its
    // size group and participates in the pairwise check.
    //
    // Given
    // -----
    // - Raw forward/backward at size 1e-5 plus a derived approximate-central
    //   at the same size, all within tolerance of each other.
    //
    // Expect
    // ------
    // - One group of three members; accepted value is their mean.
    fn raw_and_derived_pool_uniformly() {
        // Arrange
        let forward = ComputerResult { method: MethodKind::Forward, value: 400.02, size: 1e-5 };
        let backward = ComputerResult { method: MethodKind::Backward, value: 399.98, size: 1e-5 };
        let central = AnalysisResult {
            analysis: "approximate_central".to_string(),
            value: 400.0,
            size: 1e-5,
        };
        let pool: Vec<&dyn Estimate> = vec![&forward, &backward, &central];

        // Act
        let evaluation = evaluate(&pool, 1e-12, 1e-2);

        // Assert
        assert!(evaluation.success);
        assert_relative_eq!(evaluation.value.unwrap(), 400.0, epsilon = 1e-12);
    }
}
