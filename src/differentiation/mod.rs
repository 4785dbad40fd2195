//! differentiation — cross-checked finite-difference derivative engine.
//!
//! Purpose
//! -------
//! Numerically approximate the derivative (gradient or directional
//! derivatives) of a caller-supplied function at a point, and decide
//! whether the approximation is trustworthy by cross-checking multiple
//! independent estimates against each other — never against a known
//! ground truth. Callers supply the target function, the evaluation
//! point, a sequence of step sizes, and a set of method kinds, then
//! invoke [`differentiate`] to obtain a [`Derivative`] aggregate.
//!
//! Key behaviors
//! -------------
//! - Resolve the probe [`Direction`] set ([`directions`]): the standard
//!   Euclidean basis by default, or caller-supplied named vectors.
//! - Evaluate one finite-difference estimate per
//!   direction × size × method combination ([`computer`],
//!   [`orchestrator`]), with stencils resolved through the read-only
//!   [`MethodRegistry`] ([`methods`]) and `f(x)` cached once per request.
//! - Derive secondary estimates from the raw pool ([`analysis`]), e.g.
//!   [`ApproximateCentral`] synthesizing a central estimate from a
//!   forward/backward pair at matching size.
//! - Accept or reject each direction's value through a pluggable
//!   [`SuccessEvaluator`] ([`evaluate`]); the reference [`Consistency`]
//!   policy builds tolerance-based equivalence classes keyed by step
//!   size.
//! - Assemble per-direction outcomes with full provenance into the
//!   [`Derivative`] aggregate ([`derivative`]), exposing the numeric
//!   vector and concise/full row views.
//!
//! Invariants & assumptions
//! ------------------------
//! - Configuration is validated eagerly ([`validation`]): no target
//!   function call happens for a malformed request.
//! - Evaluation errors abort the whole request (fail-fast) and bubble up
//!   as [`DiffError`]; an inconsistent direction is a normal outcome
//!   (`success = false`), never an error.
//! - Every estimate generated for a direction stays attached to that
//!   direction for the lifetime of the [`Derivative`]; a direction's
//!   accepted value derives solely from its own estimates.
//! - The pipeline is single-threaded and synchronous, but results are
//!   sharded per direction with no cross-direction state, so a parallel
//!   driver could fill shards concurrently.
//!
//! Conventions
//! -----------
//! - Vectors are `ndarray` containers over `f64` (aliases in [`types`]).
//! - Errors bubble up as [`DiffResult<T>`] / [`DiffError`]; this subtree
//!   never intentionally panics and uses no `unsafe`.
//! - Method and analysis identifiers are stable lowercase strings
//!   (`"forward"`, `"approximate_central"`) used as labels in result
//!   records and report rows.
//!
//! Downstream usage
//! ----------------
//! - Typical callers import the main surface and make one request:
//!
//!   ```rust
//!   use crossdiff::differentiation::{differentiate, DiffOptions, MethodKind};
//!   use crossdiff::differentiation::errors::DiffResult;
//!   use ndarray::array;
//!
//!   let f = |x: &ndarray::Array1<f64>| -> DiffResult<f64> { Ok(x[0] * x[0]) };
//!   let opts =
//!       DiffOptions::new(vec![1e-6], vec![MethodKind::Forward, MethodKind::Backward])?;
//!   let derivative = differentiate(&f, &array![2.0], None, &opts)?;
//!   assert!(derivative.success());
//!   # Ok::<(), crossdiff::differentiation::errors::DiffError>(())
//!   ```
//!
//! - Report/table front-ends consume [`Derivative::concise_rows`] and
//!   [`Derivative::full_rows`]; they depend on no other part of the
//!   engine.
//! - New difference methods register a stencil in a [`MethodRegistry`];
//!   new analyses and success policies implement [`Analysis`] /
//!   [`SuccessEvaluator`] without touching the orchestrator.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover stencil arithmetic and caching
//!   ([`computer`]), expansion ordering and fail-fast behavior
//!   ([`orchestrator`]), derived-estimate grouping ([`analysis`]),
//!   consistency semantics ([`evaluate`]), and eager validation
//!   ([`validation`]).
//! - Integration tests exercise [`differentiate`] end-to-end on linear
//!   and Rosenbrock targets, including failure surfacing and
//!   idempotence.

pub mod analysis;
pub mod api;
pub mod computer;
pub mod derivative;
pub mod directions;
pub mod errors;
pub mod evaluate;
pub mod methods;
pub mod orchestrator;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::analysis::{Analysis, ApproximateCentral};
pub use self::api::{differentiate, DiffOptions};
pub use self::derivative::{ConciseRow, Derivative, DirectionalDerivative, FullRow};
pub use self::directions::{standard_basis, Direction};
pub use self::errors::{DiffError, DiffResult};
pub use self::evaluate::{Consistency, ConsistencyTolerances, Evaluation, GroupKey, SuccessEvaluator};
pub use self::methods::{MethodKind, MethodRegistry, Stencil, StencilTerm};
pub use self::types::{AnalysisResult, ComputerResult, Estimate, Point, Size, Value};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use crossdiff::differentiation::prelude::*;
//
// to import the main differentiation surface in a single line.

pub mod prelude {
    pub use super::analysis::{Analysis, ApproximateCentral};
    pub use super::api::{differentiate, DiffOptions};
    pub use super::derivative::Derivative;
    pub use super::directions::Direction;
    pub use super::errors::{DiffError, DiffResult};
    pub use super::evaluate::{Consistency, ConsistencyTolerances, SuccessEvaluator};
    pub use super::methods::{MethodKind, MethodRegistry};
    pub use super::types::{Point, Value};
}
