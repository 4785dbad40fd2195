//! differentiation::computer — single finite-difference evaluations.
//!
//! Purpose
//! -------
//! Evaluate one finite-difference estimate of a directional derivative:
//! given a target function, a point, a direction, a step size, and a
//! stencil, perturb the point as the stencil dictates, combine the
//! evaluations, and return the scalar estimate tagged with its generating
//! method and size.
//!
//! Key behaviors
//! -------------
//! - Evaluate stencil terms at `x + offset·h·d`, never mutating the input
//!   point, via [`compute`].
//! - Serve offset-`0` terms from a request-scoped [`BaseValue`] cache so
//!   `f(x)` is evaluated at most once per request (it is size- and
//!   direction-invariant).
//! - Reject non-finite target-function outputs and non-finite difference
//!   quotients with evaluation errors rather than letting `NaN` propagate
//!   silently into the result pool.
//!
//! Invariants & assumptions
//! ------------------------
//! - The target function is synchronous, side-effect-free, and returns a
//!   scalar wrapped in [`DiffResult`]; any error it reports is propagated
//!   unmodified, aborting the surrounding request.
//! - Inputs have already passed the eager checks in `validation`; this
//!   module performs no shape or positivity checks of its own.
//! - One or two function calls happen per invocation for the standard
//!   stencils (two perturbed evaluations for central; one perturbed plus
//!   the shared base value for forward/backward).
//!
//! Conventions
//! -----------
//! - The estimate is `Σ coefficient·f(x + offset·h·d) / h` for the
//!   stencil's terms, so stencil tables fully determine method semantics.
//! - Errors bubble up as [`DiffResult`]; this module never panics and
//!   never converts an evaluation failure into a value.
//!
//! Downstream usage
//! ----------------
//! - The orchestrator drives [`compute`] over the full
//!   direction × size × method expansion, sharing one [`BaseValue`] across
//!   all combinations.
//!
//! Testing notes
//! -------------
//! - Unit tests cover estimate correctness on simple polynomials, point
//!   immutability, base-value caching (via call counting), and the
//!   non-finite evaluation paths.
use crate::differentiation::{
    directions::Direction,
    errors::{DiffError, DiffResult},
    methods::{MethodKind, Stencil},
    types::{ComputerResult, Point, Size, Value},
};

/// Request-scoped cache of the base value `f(x)`.
///
/// Forward and backward stencils both need `f(x)`; since it does not depend
/// on the direction or the step size, one evaluation serves every
/// combination in a request.
#[derive(Debug, Clone, Default)]
pub struct BaseValue {
    cached: Option<Value>,
}

impl BaseValue {
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Return the cached base value, evaluating `function` at `point` on
    /// first use.
    ///
    /// # Errors
    /// Propagates the target function's error, or
    /// [`DiffError::NonFiniteEvaluation`] if it returned `NaN`/`±∞`.
    pub fn get_or_eval<F>(&mut self, function: &F, point: &Point) -> DiffResult<Value>
    where
        F: Fn(&Point) -> DiffResult<Value>,
    {
        if let Some(value) = self.cached {
            return Ok(value);
        }
        let value = eval_checked(function, point)?;
        self.cached = Some(value);
        Ok(value)
    }
}

/// compute — one finite-difference estimate of a directional derivative.
///
/// Purpose
/// -------
/// Apply `stencil` to `function` around `point` along `direction` at step
/// `size`, returning the scalar estimate tagged with `method` and the
/// originating size.
///
/// Parameters
/// ----------
/// - `function`: `&F`
///   Target function mapping a point to a scalar. Evaluation failures are
///   propagated, not swallowed.
/// - `point`: `&Point`
///   Base point `x`; never mutated. Perturbed points are fresh allocations
///   `x + offset·h·d`.
/// - `direction`: `&Direction`
///   Probe direction `d`. Magnitude is not normalized and scales the
///   reported derivative linearly.
/// - `size`: `Size`
///   Step length `h`; assumed finite and strictly positive.
/// - `method`: `MethodKind`
///   Tag recorded on the resulting [`ComputerResult`].
/// - `stencil`: `&Stencil`
///   The difference quotient to evaluate.
/// - `base`: `&mut BaseValue`
///   Request-scoped cache serving every offset-`0` term.
///
/// Returns
/// -------
/// `DiffResult<ComputerResult>`
///   - `Ok(result)` with the estimate, its method tag, and its size.
///   - `Err(e)` when the target function fails or produces a non-finite
///     value at any required point, or when the combined quotient itself is
///     non-finite.
///
/// Errors
/// ------
/// - Any error the target function reports, unmodified.
/// - [`DiffError::NonFiniteEvaluation`] when the function returns
///   `NaN`/`±∞`.
/// - [`DiffError::NonFiniteEstimate`] when the difference quotient
///   overflows despite finite evaluations.
///
/// Examples
/// --------
/// ```rust
/// use crossdiff::differentiation::computer::{compute, BaseValue};
/// use crossdiff::differentiation::directions::Direction;
/// use crossdiff::differentiation::errors::DiffResult;
/// use crossdiff::differentiation::methods::{MethodKind, Stencil};
/// use ndarray::array;
///
/// // f(x) = x₀², so ∂f/∂x₀ at x₀ = 1 is 2.
/// let f = |x: &ndarray::Array1<f64>| -> DiffResult<f64> { Ok(x[0] * x[0]) };
/// let point = array![1.0];
/// let direction = Direction::new("x0", array![1.0]);
/// let mut base = BaseValue::new();
///
/// let result = compute(
///     &f,
///     &point,
///     &direction,
///     0.5,
///     MethodKind::Forward,
///     &Stencil::forward(),
///     &mut base,
/// )
/// .unwrap();
/// // Forward quotient of x² at 1 with h = 0.5: ((1.5)² − 1) / 0.5 = 2.5.
/// assert_eq!(result.value, 2.5);
/// assert_eq!(result.size, 0.5);
/// ```
pub fn compute<F>(
    function: &F, point: &Point, direction: &Direction, size: Size, method: MethodKind,
    stencil: &Stencil, base: &mut BaseValue,
) -> DiffResult<ComputerResult>
where
    F: Fn(&Point) -> DiffResult<Value>,
{
    let mut weighted_sum = 0.0;
    for term in stencil.terms() {
        let value = if term.offset == 0.0 {
            base.get_or_eval(function, point)?
        } else {
            let shifted = point + &(&direction.vector * (term.offset * size));
            eval_checked(function, &shifted)?
        };
        weighted_sum += term.coefficient * value;
    }
    let estimate = weighted_sum / size;
    if !estimate.is_finite() {
        return Err(DiffError::NonFiniteEstimate { method, size, value: estimate });
    }
    Ok(ComputerResult { method, value: estimate, size })
}

/// Evaluate the target function and reject non-finite outputs.
fn eval_checked<F>(function: &F, point: &Point) -> DiffResult<Value>
where
    F: Fn(&Point) -> DiffResult<Value>,
{
    let value = function(point)?;
    if !value.is_finite() {
        return Err(DiffError::NonFiniteEvaluation { value });
    }
    Ok(value)
}
