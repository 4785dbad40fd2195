//! differentiation::derivative — the aggregate result of a request.
//!
//! Purpose
//! -------
//! Hold everything a derivative request produced: per-direction success
//! flags and accepted values, the full provenance of raw and derived
//! estimates, and the convenience accessors callers consume — the numeric
//! derivative vector and the concise/full tabular views.
//!
//! Key behaviors
//! -------------
//! - [`DirectionalDerivative`] keeps a direction's outcome together with
//!   its complete ordered estimate sequences; provenance is never
//!   discarded.
//! - [`Derivative::value`] builds the derivative vector in direction
//!   order, surfacing failed directions as `NaN` so the vector always has
//!   one slot per direction.
//! - [`Derivative::success`] reduces per-direction flags with logical
//!   AND; callers must check it (or per-direction flags) before trusting
//!   the vector.
//! - [`Derivative::concise_rows`] / [`Derivative::full_rows`] build plain
//!   row sequences for reporting layers; no core decision depends on this
//!   representation.
//!
//! Invariants & assumptions
//! ------------------------
//! - A direction's accepted value was derived solely from its own
//!   estimates; there is no cross-direction interaction.
//! - `value` is `Some` exactly when `success` is true for that direction.
//! - Result sequences are frozen once the aggregate is assembled.
//!
//! Downstream usage
//! ----------------
//! - Report/table front-ends consume the row accessors; numeric callers
//!   take [`Derivative::value`] plus [`Derivative::success`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the NaN slot policy, the AND reduction, and row
//!   assembly ordering; end-to-end content is covered by the integration
//!   tests.
use crate::differentiation::{
    directions::Direction,
    types::{AnalysisResult, ComputerResult, Estimate, Point, Size, Value},
};

/// One direction's aggregate: outcome plus full provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalDerivative {
    pub direction: Direction,
    pub success: bool,
    /// Accepted value; `None` exactly when `success` is false.
    pub value: Option<Value>,
    /// Raw estimates in generation order.
    pub computed: Vec<ComputerResult>,
    /// Derived estimates in analysis registration order.
    pub derived: Vec<AnalysisResult>,
}

impl DirectionalDerivative {
    /// Uniform pooled view over raw then derived estimates.
    pub fn estimates(&self) -> Vec<&dyn Estimate> {
        self.computed
            .iter()
            .map(|r| r as &dyn Estimate)
            .chain(self.derived.iter().map(|r| r as &dyn Estimate))
            .collect()
    }
}

/// The final output of a derivative request.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivative {
    pub directions: Vec<DirectionalDerivative>,
}

impl Derivative {
    /// Overall success: logical AND over per-direction successes.
    pub fn success(&self) -> bool {
        self.directions.iter().all(|d| d.success)
    }

    /// The derivative vector, one scalar per direction in direction order.
    ///
    /// Failed directions surface as `NaN`; check [`Derivative::success`]
    /// or the per-direction flags before trusting individual slots.
    pub fn value(&self) -> Point {
        self.directions.iter().map(|d| d.value.unwrap_or(f64::NAN)).collect()
    }

    /// One row per direction: identifier, success, accepted value.
    pub fn concise_rows(&self) -> Vec<ConciseRow> {
        self.directions
            .iter()
            .map(|d| ConciseRow {
                direction: d.direction.id.clone(),
                success: d.success,
                value: d.value,
            })
            .collect()
    }

    /// One row per estimate (raw then derived, per direction), annotated
    /// with the direction's outcome for debugging.
    pub fn full_rows(&self) -> Vec<FullRow> {
        let mut rows = Vec::new();
        for directional in &self.directions {
            for estimate in directional.estimates() {
                rows.push(FullRow {
                    direction: directional.direction.id.clone(),
                    source: estimate.label().to_string(),
                    size: estimate.size(),
                    estimate: estimate.value(),
                    success: directional.success,
                    value: directional.value,
                });
            }
        }
        rows
    }
}

/// Row of the concise per-direction view.
#[derive(Debug, Clone, PartialEq)]
pub struct ConciseRow {
    pub direction: String,
    pub success: bool,
    pub value: Option<Value>,
}

/// Row of the full per-estimate view.
#[derive(Debug, Clone, PartialEq)]
pub struct FullRow {
    pub direction: String,
    /// Method or analysis identifier that produced the estimate.
    pub source: String,
    pub size: Size,
    pub estimate: Value,
    pub success: bool,
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differentiation::methods::MethodKind;
    use ndarray::array;

    fn directional(
        id: &str, success: bool, value: Option<f64>, computed: Vec<ComputerResult>,
        derived: Vec<AnalysisResult>,
    ) -> DirectionalDerivative {
        DirectionalDerivative {
            direction: Direction::new(id, array![1.0]),
            success,
            value,
            computed,
            derived,
        }
    }

    #[test]
    fn value_surfaces_failed_directions_as_nan() {
        let derivative = Derivative {
            directions: vec![
                directional("x0", true, Some(2.5), vec![], vec![]),
                directional("x1", false, None, vec![], vec![]),
            ],
        };
        let value = derivative.value();
        assert_eq!(value[0], 2.5);
        assert!(value[1].is_nan());
        assert!(!derivative.success());
    }

    #[test]
    fn success_is_an_and_reduction() {
        let all_good = Derivative {
            directions: vec![
                directional("x0", true, Some(1.0), vec![], vec![]),
                directional("x1", true, Some(2.0), vec![], vec![]),
            ],
        };
        assert!(all_good.success());
    }

    #[test]
    fn rows_preserve_direction_and_estimate_order() {
        let computed = vec![
            ComputerResult { method: MethodKind::Forward, value: 1.0, size: 1e-5 },
            ComputerResult { method: MethodKind::Backward, value: 1.2, size: 1e-5 },
        ];
        let derived = vec![AnalysisResult {
            analysis: "approximate_central".to_string(),
            value: 1.1,
            size: 1e-5,
        }];
        let derivative = Derivative {
            directions: vec![directional("x0", true, Some(1.1), computed, derived)],
        };

        let concise = derivative.concise_rows();
        assert_eq!(concise.len(), 1);
        assert_eq!(concise[0].direction, "x0");
        assert_eq!(concise[0].value, Some(1.1));

        let full = derivative.full_rows();
        let sources: Vec<&str> = full.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["forward", "backward", "approximate_central"]);
        assert!(full.iter().all(|r| r.direction == "x0" && r.success));
    }
}
