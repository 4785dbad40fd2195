//! crossdiff — finite-difference derivatives with cross-checked acceptance.
//!
//! Purpose
//! -------
//! Serve as the crate root for the differentiation engine: approximate
//! the derivative of an arbitrary scalar-valued function at a point with
//! finite differences, and accept a value only when multiple independent
//! estimates (different step sizes, different stencils, derived analyses)
//! agree within a principled tolerance model.
//!
//! Key behaviors
//! -------------
//! - Re-export the [`differentiation`] module as the public crate
//!   surface.
//! - Keep the crate free of I/O, persistence, and presentation concerns;
//!   reporting layers consume the row accessors on
//!   [`differentiation::Derivative`].
//!
//! Downstream usage
//! ----------------
//! - Most callers need only the request entry point and its options:
//!
//!   ```rust
//!   use crossdiff::differentiation::prelude::*;
//!   use ndarray::array;
//!
//!   let f = |x: &Point| -> DiffResult<f64> { Ok(x[0] * x[0]) };
//!   let opts =
//!       DiffOptions::new(vec![1e-6], vec![MethodKind::Forward, MethodKind::Backward])?;
//!   let derivative = differentiate(&f, &array![2.0], None, &opts)?;
//!   assert!(derivative.success());
//!   # Ok::<(), DiffError>(())
//!   ```

pub mod differentiation;
