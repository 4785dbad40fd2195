//! differentiation::types — shared numeric aliases and result records.
//!
//! Purpose
//! -------
//! Centralize the core numeric types used across the differentiation
//! engine. By defining these in one place, the rest of the code can stay
//! agnostic to `ndarray` and can more easily evolve if the container
//! backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for evaluation points, scalar estimates, and
//!   step sizes (`Point`, `Value`, `Size`).
//! - Define the immutable result records produced by the computation and
//!   analysis layers (`ComputerResult`, `AnalysisResult`).
//! - Provide the [`Estimate`] view that both result kinds implement so the
//!   success evaluator can pool them uniformly.
//!
//! Invariants & assumptions
//! ------------------------
//! - All vectors are represented as `ndarray` containers over `f64`.
//! - Result records are append-only during computation and frozen
//!   afterwards; nothing in this crate mutates a result after creation.
//! - `size` on a result always records the step size that generated it (or
//!   the grouping size for derived estimates), never a transformed value.
//!
//! Conventions
//! -----------
//! - A `Point` is treated conceptually as a column vector of dimension `n`.
//! - `Value` is a scalar directional-derivative estimate; vector-valued
//!   targets are differentiated component-wise by the caller.
//! - Labels exposed through [`Estimate::label`] are stable, lowercase
//!   identifiers (method ids like `"forward"`, analysis ids like
//!   `"approximate_central"`).
//!
//! Downstream usage
//! ----------------
//! - The computer and orchestrator produce [`ComputerResult`]s; analyses
//!   produce [`AnalysisResult`]s; the success evaluator consumes both
//!   through `&dyn Estimate`.
//! - Other modules import these aliases instead of referring directly to
//!   `ndarray` types.
//!
//! Testing notes
//! -------------
//! - This module only defines aliases and plain records; there are no
//!   dedicated unit tests. Correctness is exercised by the modules that
//!   construct and consume these types.
use ndarray::Array1;

use crate::differentiation::methods::MethodKind;

/// Evaluation point `x` at which the derivative is probed.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical vector type
/// throughout the engine.
pub type Point = Array1<f64>;

/// Scalar directional-derivative estimate.
pub type Value = f64;

/// Positive step length `h` used by a finite-difference stencil.
pub type Size = f64;

/// Default absolute tolerance for the consistency policy.
pub const DEFAULT_ATOL: f64 = 1e-12;

/// Default relative tolerance for the consistency policy.
pub const DEFAULT_RTOL: f64 = 1e-2;

/// One raw finite-difference estimate.
///
/// Produced by the difference computer, owned by the orchestrator's
/// per-direction result sequence, and referenced (never mutated) by the
/// analysis and evaluation layers.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputerResult {
    /// Method kind that generated this estimate.
    pub method: MethodKind,
    /// The directional-derivative estimate.
    pub value: Value,
    /// Step size the stencil was evaluated at.
    pub size: Size,
}

/// One derived estimate emitted by an analysis.
///
/// Structurally identical in shape to [`ComputerResult`] so both kinds can
/// be pooled uniformly by a success evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Identifier of the analysis that produced this estimate.
    pub analysis: String,
    /// The derived directional-derivative estimate.
    pub value: Value,
    /// Step size of the group this estimate was derived from.
    pub size: Size,
}

/// Uniform read-only view over raw and derived estimates.
///
/// The success evaluator works against this capability so that raw
/// computations and analysis outputs cross-validate each other without the
/// evaluator knowing which layer produced a given value.
pub trait Estimate {
    /// Stable identifier of the producing method or analysis.
    fn label(&self) -> &str;

    /// The scalar estimate.
    fn value(&self) -> Value;

    /// Step size associated with the estimate.
    fn size(&self) -> Size;
}

impl Estimate for ComputerResult {
    fn label(&self) -> &str {
        self.method.id()
    }

    fn value(&self) -> Value {
        self.value
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl Estimate for AnalysisResult {
    fn label(&self) -> &str {
        &self.analysis
    }

    fn value(&self) -> Value {
        self.value
    }

    fn size(&self) -> Size {
        self.size
    }
}
