//! differentiation::orchestrator — the Cartesian expansion driver.
//!
//! Purpose
//! -------
//! Expand a request into every direction × size × method combination,
//! invoke the difference computer for each, and collect the raw estimates
//! per direction with their generating parameters preserved.
//!
//! Key behaviors
//! -------------
//! - Run the eager configuration checks from `validation` before the first
//!   target-function call.
//! - Iterate direction outer, then size, then method; the order affects
//!   only result-sequence ordering, never correctness.
//! - Fail fast: the first evaluation error aborts the whole request and is
//!   propagated unmodified.
//! - Share one [`BaseValue`] cache across all combinations so `f(x)` is
//!   evaluated at most once per request.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every requested combination is evaluated; none are skipped
//!   speculatively.
//! - Results are appended per direction and never reordered, so a
//!   direction's sequence reflects the documented iteration order.
//! - Each [`DirectionRun`] shard is independent of every other direction's
//!   shard; a parallel driver could fill shards concurrently and merge,
//!   though this implementation is single-threaded.
//!
//! Downstream usage
//! ----------------
//! - The request entry point resolves directions, calls [`run`], and hands
//!   the per-direction shards to the analysis and evaluation layers.
//!
//! Testing notes
//! -------------
//! - Unit tests cover result ordering, the total evaluation count implied
//!   by base-value caching, eager rejection before any evaluation, and
//!   fail-fast propagation of mid-run evaluation errors.
use crate::differentiation::{
    computer::{compute, BaseValue},
    directions::Direction,
    errors::DiffResult,
    methods::{MethodKind, MethodRegistry},
    types::{ComputerResult, Point, Size, Value},
    validation::{validate_directions, validate_methods, validate_point, validate_sizes},
};

/// One direction's shard of raw estimates, in generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionRun {
    pub direction: Direction,
    pub computed: Vec<ComputerResult>,
}

/// Evaluate every direction × size × method combination.
///
/// # Behavior
/// - Validates the point, sizes, methods (against `registry`), and
///   directions before any target-function call.
/// - For each direction, appends one [`ComputerResult`] per (size, method)
///   pair in request order.
///
/// # Errors
/// - Any configuration error from the eager checks, raised before the
///   first evaluation.
/// - Any evaluation error from the difference computer, aborting the
///   request at the first failing combination.
pub fn run<F>(
    function: &F, point: &Point, directions: &[Direction], sizes: &[Size],
    methods: &[MethodKind], registry: &MethodRegistry,
) -> DiffResult<Vec<DirectionRun>>
where
    F: Fn(&Point) -> DiffResult<Value>,
{
    validate_point(point)?;
    validate_sizes(sizes)?;
    validate_methods(methods, registry)?;
    validate_directions(point, directions)?;

    let mut base = BaseValue::new();
    let mut runs = Vec::with_capacity(directions.len());
    for direction in directions {
        let mut computed = Vec::with_capacity(sizes.len() * methods.len());
        for &size in sizes {
            for &method in methods {
                let stencil = registry.stencil(method)?;
                computed.push(compute(function, point, direction, size, method, stencil, &mut base)?);
            }
        }
        runs.push(DirectionRun { direction: direction.clone(), computed });
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differentiation::directions::standard_basis;
    use crate::differentiation::errors::DiffError;
    use ndarray::array;
    use std::cell::Cell;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Result ordering (direction outer, then size, then method).
    // - Total evaluation counts with base-value caching.
    // - Eager rejection of unregistered methods before any evaluation.
    // - Fail-fast abortion on a mid-run evaluation error.
    //
    // They intentionally DO NOT cover:
    // - Individual stencil arithmetic (computer tests).
    // - Analysis or consistency behavior (analysis / evaluate tests).
    // -------------------------------------------------------------------------

    fn linear(x: &Point) -> DiffResult<Value> {
        Ok(2.0 * x[0] - 0.5 * x[1])
    }

    #[test]
    // Purpose
    // -------
    // Verify that each direction's shard lists sizes outer and methods inner,
    // in request order.
    //
    // Given
    // -----
    // - 2 directions (standard basis), sizes [0.5, 0.25], methods
    //   [Forward, Backward].
    //
    // Expect
    // ------
    // - Per direction: (0.5, F), (0.5, B), (0.25, F), (0.25, B).
    fn results_follow_request_order() {
        // Arrange
        let point = array![1.0, 2.0];
        let directions = standard_basis(2);
        let sizes = [0.5, 0.25];
        let methods = [MethodKind::Forward, MethodKind::Backward];
        let registry = MethodRegistry::standard();

        // Act
        let runs = run(&linear, &point, &directions, &sizes, &methods, &registry).unwrap();

        // Assert
        assert_eq!(runs.len(), 2);
        for shard in &runs {
            let tags: Vec<(Size, MethodKind)> =
                shard.computed.iter().map(|r| (r.size, r.method)).collect();
            assert_eq!(
                tags,
                vec![
                    (0.5, MethodKind::Forward),
                    (0.5, MethodKind::Backward),
                    (0.25, MethodKind::Forward),
                    (0.25, MethodKind::Backward),
                ]
            );
        }
        assert_eq!(runs[0].direction.id, "x0");
        assert_eq!(runs[1].direction.id, "x1");
    }

    #[test]
    // Purpose
    // -------
    // Confirm the base value is shared across the whole expansion: forward
    // and backward need one perturbed evaluation each, plus a single shared
    // f(x).
    //
    // Given
    // -----
    // - 2 directions × 2 sizes × 2 methods (forward, backward).
    //
    // Expect
    // ------
    // - 2·2·2 perturbed evaluations + 1 base evaluation = 9 calls.
    fn base_value_shared_across_expansion() {
        // Arrange
        let calls = Cell::new(0usize);
        let f = |x: &Point| -> DiffResult<Value> {
            calls.set(calls.get() + 1);
            linear(x)
        };
        let point = array![1.0, 2.0];
        let directions = standard_basis(2);
        let sizes = [0.5, 0.25];
        let methods = [MethodKind::Forward, MethodKind::Backward];
        let registry = MethodRegistry::standard();

        // Act
        run(&f, &point, &directions, &sizes, &methods, &registry).unwrap();

        // Assert
        assert_eq!(calls.get(), 9);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an unregistered method kind is rejected before the target
    // function is called even once.
    //
    // Given
    // -----
    // - A registry containing only Forward, a request for Backward, and a
    //   call-counting stub function.
    //
    // Expect
    // ------
    // - `Err(DiffError::UnregisteredMethod { method: Backward })`.
    // - Zero target-function calls.
    fn unregistered_method_rejected_before_any_evaluation() {
        // Arrange
        let calls = Cell::new(0usize);
        let f = |x: &Point| -> DiffResult<Value> {
            calls.set(calls.get() + 1);
            Ok(x[0])
        };
        let point = array![1.0];
        let directions = standard_basis(1);
        let mut registry = MethodRegistry::empty();
        registry.register(MethodKind::Forward, crate::differentiation::methods::Stencil::forward());

        // Act
        let err = run(
            &f,
            &point,
            &directions,
            &[1e-5],
            &[MethodKind::Forward, MethodKind::Backward],
            &registry,
        )
        .expect_err("Backward is not registered");

        // Assert
        assert_eq!(err, DiffError::UnregisteredMethod { method: MethodKind::Backward });
        assert_eq!(calls.get(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Verify fail-fast semantics: an evaluation error on one combination
    // aborts the whole request.
    fn evaluation_error_aborts_request() {
        // Arrange
        let f = |x: &Point| -> DiffResult<Value> {
            if x[1] > 2.0 {
                return Err(DiffError::EvaluationFailed { reason: "pole".to_string() });
            }
            Ok(x[0] + x[1])
        };
        let point = array![1.0, 2.0];
        let directions = standard_basis(2);
        let registry = MethodRegistry::standard();

        // Act
        let result =
            run(&f, &point, &directions, &[0.5], &[MethodKind::Forward], &registry);

        // Assert
        assert_eq!(
            result,
            Err(DiffError::EvaluationFailed { reason: "pole".to_string() })
        );
    }
}
