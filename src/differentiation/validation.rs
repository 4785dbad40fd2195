//! Validation helpers for derivative requests.
//!
//! This module centralizes the eager configuration checks performed before
//! any target-function evaluation:
//!
//! - **Point checks**: [`validate_point`] enforces a non-empty, finite
//!   evaluation point.
//! - **Size checks**: [`validate_sizes`] enforces a non-empty sequence of
//!   finite, strictly positive step sizes.
//! - **Method checks**: [`validate_methods`] enforces a non-empty method
//!   set whose kinds are all present in the registry.
//! - **Direction checks**: [`validate_directions`] enforces a non-empty
//!   direction set with matching dimensionality, finite components, and
//!   unique identifiers.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`DiffError`] variants carrying the first offending index/value.
use crate::differentiation::{
    directions::Direction,
    errors::{DiffError, DiffResult},
    methods::{MethodKind, MethodRegistry},
    types::{Point, Size},
};

/// Validate the evaluation point.
///
/// Checks:
/// - at least one coordinate
/// - every coordinate is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`DiffError::EmptyPoint`] for a zero-dimensional point.
/// - [`DiffError::NonFiniteCoordinate`] with the index/value of the first
///   offending coordinate.
pub fn validate_point(point: &Point) -> DiffResult<()> {
    if point.is_empty() {
        return Err(DiffError::EmptyPoint);
    }
    for (index, &value) in point.iter().enumerate() {
        if !value.is_finite() {
            return Err(DiffError::NonFiniteCoordinate { index, value });
        }
    }
    Ok(())
}

/// Validate the step-size sequence.
///
/// Sizes must be **finite** and **strictly positive**; an empty sequence is
/// rejected.
///
/// # Errors
/// - [`DiffError::EmptySizes`] if no sizes were provided.
/// - [`DiffError::InvalidSize`] with the index/value/reason of the first
///   offending size.
pub fn validate_sizes(sizes: &[Size]) -> DiffResult<()> {
    if sizes.is_empty() {
        return Err(DiffError::EmptySizes);
    }
    for (index, &value) in sizes.iter().enumerate() {
        if !value.is_finite() {
            return Err(DiffError::InvalidSize {
                index,
                value,
                reason: "Step size must be finite.",
            });
        }
        if value <= 0.0 {
            return Err(DiffError::InvalidSize {
                index,
                value,
                reason: "Step size must be positive.",
            });
        }
    }
    Ok(())
}

/// Validate the requested method kinds against the registry.
///
/// # Errors
/// - [`DiffError::EmptyMethods`] if no kinds were requested.
/// - [`DiffError::UnregisteredMethod`] for the first kind the registry does
///   not contain.
pub fn validate_methods(methods: &[MethodKind], registry: &MethodRegistry) -> DiffResult<()> {
    if methods.is_empty() {
        return Err(DiffError::EmptyMethods);
    }
    for &method in methods {
        if !registry.contains(method) {
            return Err(DiffError::UnregisteredMethod { method });
        }
    }
    Ok(())
}

/// Validate a direction set against the evaluation point.
///
/// Checks:
/// - at least one direction
/// - every vector has the point's dimension
/// - every component is finite
/// - identifiers are unique
///
/// # Errors
/// - [`DiffError::EmptyDirections`] if no directions were provided.
/// - [`DiffError::DirectionDimMismatch`] for the first vector of the wrong
///   length.
/// - [`DiffError::NonFiniteDirection`] for the first non-finite component.
/// - [`DiffError::DuplicateDirection`] for the first repeated identifier.
pub fn validate_directions(point: &Point, directions: &[Direction]) -> DiffResult<()> {
    if directions.is_empty() {
        return Err(DiffError::EmptyDirections);
    }
    for direction in directions {
        if direction.vector.len() != point.len() {
            return Err(DiffError::DirectionDimMismatch {
                id: direction.id.clone(),
                expected: point.len(),
                found: direction.vector.len(),
            });
        }
        for (index, &value) in direction.vector.iter().enumerate() {
            if !value.is_finite() {
                return Err(DiffError::NonFiniteDirection {
                    id: direction.id.clone(),
                    index,
                    value,
                });
            }
        }
    }
    for (i, direction) in directions.iter().enumerate() {
        if directions[..i].iter().any(|other| other.id == direction.id) {
            return Err(DiffError::DuplicateDirection { id: direction.id.clone() });
        }
    }
    Ok(())
}
