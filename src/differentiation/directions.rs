//! Probe directions for a derivative request.
//!
//! A direction pairs an identifier with a vector of the point's dimension.
//! The default set is the standard Euclidean basis, so a request with no
//! explicit directions computes an ordinary gradient component per
//! coordinate. Direction magnitude is not normalized: the reported
//! directional derivative scales linearly with it.
use crate::differentiation::types::Point;

/// An identifier-tagged probe vector.
///
/// Invariant: within one request, identifiers are unique and every vector
/// has the point's dimension (enforced by the orchestrator's eager
/// validation, not by this constructor).
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub id: String,
    pub vector: Point,
}

impl Direction {
    pub fn new(id: impl Into<String>, vector: Point) -> Self {
        Self { id: id.into(), vector }
    }
}

/// The standard Euclidean basis `{e₀, …, e_{dim−1}}`, tagged `x0…x{dim−1}`.
pub fn standard_basis(dim: usize) -> Vec<Direction> {
    (0..dim)
        .map(|i| {
            let mut vector = Point::zeros(dim);
            vector[i] = 1.0;
            Direction::new(format!("x{i}"), vector)
        })
        .collect()
}

/// Resolve a request's direction set: caller-supplied vectors, or the
/// standard basis of the point's dimension when none were given.
pub fn resolve(point: &Point, directions: Option<Vec<Direction>>) -> Vec<Direction> {
    match directions {
        Some(directions) => directions,
        None => standard_basis(point.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn standard_basis_is_identity_tagged_by_coordinate() {
        let basis = standard_basis(3);
        assert_eq!(basis.len(), 3);
        for (i, direction) in basis.iter().enumerate() {
            assert_eq!(direction.id, format!("x{i}"));
            assert_eq!(direction.vector.len(), 3);
            for (j, &component) in direction.vector.iter().enumerate() {
                assert_eq!(component, if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn resolve_defaults_to_standard_basis() {
        let point = array![1.0, 2.0];
        let resolved = resolve(&point, None);
        assert_eq!(resolved, standard_basis(2));
    }

    #[test]
    fn resolve_keeps_caller_supplied_directions() {
        let point = array![1.0, 2.0];
        let custom = vec![Direction::new("diag", array![1.0, 1.0])];
        let resolved = resolve(&point, Some(custom.clone()));
        assert_eq!(resolved, custom);
    }
}
