use crate::differentiation::methods::MethodKind;

/// Crate-wide result alias for differentiation operations.
pub type DiffResult<T> = Result<T, DiffError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DiffError {
    // ---- Point ----
    /// The evaluation point has dimension zero.
    EmptyPoint,

    /// Point coordinates need to be finite.
    NonFiniteCoordinate {
        index: usize,
        value: f64,
    },

    // ---- Sizes ----
    /// At least one step size must be provided.
    EmptySizes,

    /// Step sizes need to be finite and strictly positive.
    InvalidSize {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Methods ----
    /// At least one method kind must be requested.
    EmptyMethods,

    /// Method name could not be parsed into a known kind.
    UnknownMethodName {
        name: String,
        reason: &'static str,
    },

    /// Method kind is not present in the registry.
    UnregisteredMethod {
        method: MethodKind,
    },

    // ---- Directions ----
    /// At least one direction must be provided.
    EmptyDirections,

    /// Direction vector length does not match the point dimension.
    DirectionDimMismatch {
        id: String,
        expected: usize,
        found: usize,
    },

    /// Direction components need to be finite.
    NonFiniteDirection {
        id: String,
        index: usize,
        value: f64,
    },

    /// Direction identifiers must be unique within a request.
    DuplicateDirection {
        id: String,
    },

    // ---- Tolerances ----
    /// Absolute tolerance must be finite and non-negative.
    InvalidAtol {
        value: f64,
        reason: &'static str,
    },

    /// Relative tolerance must be finite and non-negative.
    InvalidRtol {
        value: f64,
        reason: &'static str,
    },

    // ---- Evaluation ----
    /// The target function reported a failure at a required point.
    EvaluationFailed {
        reason: String,
    },

    /// The target function returned a non-finite value.
    NonFiniteEvaluation {
        value: f64,
    },

    /// A difference quotient came out non-finite despite finite evaluations.
    NonFiniteEstimate {
        method: MethodKind,
        size: f64,
        value: f64,
    },
}

impl std::error::Error for DiffError {}

impl std::fmt::Display for DiffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Point ----
            DiffError::EmptyPoint => {
                write!(f, "Evaluation point must have at least one coordinate")
            }
            DiffError::NonFiniteCoordinate { index, value } => {
                write!(f, "Non-finite point coordinate at index {index}: {value}")
            }

            // ---- Sizes ----
            DiffError::EmptySizes => {
                write!(f, "No step sizes provided")
            }
            DiffError::InvalidSize { index, value, reason } => {
                write!(f, "Invalid step size at index {index}: {value}: {reason}")
            }

            // ---- Methods ----
            DiffError::EmptyMethods => {
                write!(f, "No method kinds requested")
            }
            DiffError::UnknownMethodName { name, reason } => {
                write!(f, "Unknown method name '{name}': {reason}")
            }
            DiffError::UnregisteredMethod { method } => {
                write!(f, "Method kind '{method}' is not registered")
            }

            // ---- Directions ----
            DiffError::EmptyDirections => {
                write!(f, "No directions provided")
            }
            DiffError::DirectionDimMismatch { id, expected, found } => {
                write!(
                    f,
                    "Direction '{id}' dimension mismatch: expected {expected}, found {found}"
                )
            }
            DiffError::NonFiniteDirection { id, index, value } => {
                write!(f, "Non-finite component in direction '{id}' at index {index}: {value}")
            }
            DiffError::DuplicateDirection { id } => {
                write!(f, "Duplicate direction identifier '{id}'")
            }

            // ---- Tolerances ----
            DiffError::InvalidAtol { value, reason } => {
                write!(f, "Invalid absolute tolerance {value}: {reason}")
            }
            DiffError::InvalidRtol { value, reason } => {
                write!(f, "Invalid relative tolerance {value}: {reason}")
            }

            // ---- Evaluation ----
            DiffError::EvaluationFailed { reason } => {
                write!(f, "Target function evaluation failed: {reason}")
            }
            DiffError::NonFiniteEvaluation { value } => {
                write!(f, "Target function returned a non-finite value: {value}")
            }
            DiffError::NonFiniteEstimate { method, size, value } => {
                write!(
                    f,
                    "Non-finite '{method}' estimate at step size {size}: {value}"
                )
            }
        }
    }
}
