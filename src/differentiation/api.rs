//! High-level entry point for a derivative request.
//!
//! This resolves the direction set (standard basis unless supplied), runs
//! the direction × size × method expansion, applies the registered
//! analyses, and evaluates per-direction success, assembling everything
//! into a [`Derivative`] aggregate.
use crate::differentiation::{
    analysis::Analysis,
    derivative::{Derivative, DirectionalDerivative},
    directions::{self, Direction},
    errors::{DiffError, DiffResult},
    evaluate::{Consistency, SuccessEvaluator},
    methods::{MethodKind, MethodRegistry},
    orchestrator,
    types::{Estimate, Point, Size, Value},
    validation::{validate_point, validate_sizes},
};

/// Configuration for a derivative request.
///
/// Carries the step sizes and method kinds to expand over, the method
/// registry they resolve against, the analyses to apply per direction, and
/// the success evaluator that accepts or rejects each direction.
///
/// Defaults (set by [`DiffOptions::new`]):
/// - `registry`: [`MethodRegistry::standard`]
/// - `analyses`: none
/// - `evaluator`: [`Consistency`] with default tolerances
pub struct DiffOptions {
    pub sizes: Vec<Size>,
    pub methods: Vec<MethodKind>,
    pub registry: MethodRegistry,
    pub analyses: Vec<Box<dyn Analysis>>,
    pub evaluator: Box<dyn SuccessEvaluator>,
}

impl DiffOptions {
    /// Create request options from sizes and method kinds.
    ///
    /// Sizes must be finite and strictly positive; both sequences must be
    /// non-empty. Registry membership of the kinds is checked at request
    /// time, after any custom registry has been attached.
    ///
    /// # Errors
    /// - [`DiffError::EmptySizes`] / [`DiffError::InvalidSize`] for a bad
    ///   size sequence.
    /// - [`DiffError::EmptyMethods`] if no kinds were requested.
    pub fn new(sizes: Vec<Size>, methods: Vec<MethodKind>) -> DiffResult<Self> {
        validate_sizes(&sizes)?;
        if methods.is_empty() {
            return Err(DiffError::EmptyMethods);
        }
        Ok(Self {
            sizes,
            methods,
            registry: MethodRegistry::standard(),
            analyses: Vec::new(),
            evaluator: Box::new(Consistency::default()),
        })
    }

    /// Replace the method registry.
    pub fn with_registry(mut self, registry: MethodRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Append an analysis; outputs are pooled in registration order.
    pub fn with_analysis(mut self, analysis: Box<dyn Analysis>) -> Self {
        self.analyses.push(analysis);
        self
    }

    /// Replace the success evaluator.
    pub fn with_evaluator(mut self, evaluator: Box<dyn SuccessEvaluator>) -> Self {
        self.evaluator = evaluator;
        self
    }
}

/// Approximate the derivative of `function` at `point` and cross-check it.
///
/// # Behavior
/// - Validates the point eagerly, then resolves `directions` (standard
///   basis when `None`).
/// - Runs every direction × size × method combination through the
///   difference computer (fail-fast on evaluation errors).
/// - Applies each registered analysis to each direction's raw estimates.
/// - Pools raw and derived estimates per direction and asks the
///   configured evaluator for the direction's success and value.
///
/// # Parameters
/// - `function`: target callable mapping a point to a scalar, reporting
///   failures through [`DiffResult`].
/// - `point`: evaluation point; never mutated.
/// - `directions`: optional named probe vectors; defaults to the standard
///   basis of the point's dimension.
/// - `opts`: sizes, methods, registry, analyses, and evaluator.
///
/// # Errors
/// - Configuration errors from the eager checks, before any function
///   call.
/// - Evaluation errors propagated unmodified from the target function.
///
/// # Returns
/// A [`Derivative`] carrying per-direction outcomes with full provenance.
/// An inconsistent direction is a normal result (`success = false`), not
/// an error.
///
/// # Example
/// ```rust
/// use crossdiff::differentiation::api::{differentiate, DiffOptions};
/// use crossdiff::differentiation::errors::DiffResult;
/// use crossdiff::differentiation::methods::MethodKind;
/// use ndarray::array;
///
/// let f = |x: &ndarray::Array1<f64>| -> DiffResult<f64> { Ok(x[0] * x[0] + 3.0 * x[1]) };
/// let point = array![1.0, 2.0];
/// let opts = DiffOptions::new(
///     vec![1e-6, 1e-7],
///     vec![MethodKind::Forward, MethodKind::Backward],
/// )?;
///
/// let derivative = differentiate(&f, &point, None, &opts)?;
/// assert!(derivative.success());
/// let value = derivative.value();
/// assert!((value[0] - 2.0).abs() < 1e-3);
/// assert!((value[1] - 3.0).abs() < 1e-3);
/// # Ok::<(), crossdiff::differentiation::errors::DiffError>(())
/// ```
pub fn differentiate<F>(
    function: &F, point: &Point, directions: Option<Vec<Direction>>, opts: &DiffOptions,
) -> DiffResult<Derivative>
where
    F: Fn(&Point) -> DiffResult<Value>,
{
    validate_point(point)?;
    let directions = directions::resolve(point, directions);
    let runs = orchestrator::run(
        function,
        point,
        &directions,
        &opts.sizes,
        &opts.methods,
        &opts.registry,
    )?;

    let mut per_direction = Vec::with_capacity(runs.len());
    for run in runs {
        let mut derived = Vec::new();
        for analysis in &opts.analyses {
            derived.extend(analysis.derive(&run.computed));
        }
        let pooled: Vec<&dyn Estimate> = run
            .computed
            .iter()
            .map(|r| r as &dyn Estimate)
            .chain(derived.iter().map(|r| r as &dyn Estimate))
            .collect();
        let evaluation = opts.evaluator.evaluate(&run.direction, &pooled);
        per_direction.push(DirectionalDerivative {
            direction: run.direction,
            success: evaluation.success,
            value: evaluation.value,
            computed: run.computed,
            derived,
        });
    }
    Ok(Derivative { directions: per_direction })
}
