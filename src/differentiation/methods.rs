//! differentiation::methods — method kinds, stencils, and the registry.
//!
//! Purpose
//! -------
//! Map each finite-difference method kind to a fixed stencil and provide
//! the read-only registry the orchestrator resolves requested kinds
//! against. A stencil is a list of `(coefficient, offset)` terms over
//! perturbed points `x + offset·h·d`, scaled by `1/h`, so new methods can
//! be registered without touching the computer or the orchestrator.
//!
//! Key behaviors
//! -------------
//! - Tag the supported kinds with [`MethodKind`] and parse them from
//!   case-insensitive names via `FromStr`.
//! - Represent each method's difference quotient as a [`Stencil`] of
//!   [`StencilTerm`]s.
//! - Resolve kinds through [`MethodRegistry`], rejecting kinds that were
//!   never registered before any function evaluation happens.
//!
//! Invariants & assumptions
//! ------------------------
//! - The registry is read-only configuration after construction: it is
//!   built once per request setup and shared by reference.
//! - Standard stencils are exact first-order quotients:
//!   forward `(f(x+h·d) − f(x))/h`, backward `(f(x) − f(x−h·d))/h`,
//!   central `(f(x+h·d) − f(x−h·d))/(2h)`.
//! - Offset `0.0` terms are served from the request-scoped base-value
//!   cache; the registry itself never evaluates anything.
//!
//! Conventions
//! -----------
//! - Method ids are lowercase (`"forward"`, `"backward"`, `"central"`) and
//!   are the labels attached to raw estimates in result records.
//!
//! Downstream usage
//! ----------------
//! - The orchestrator calls [`MethodRegistry::stencil`] once per
//!   (direction, size, method) combination and hands the stencil to the
//!   difference computer.
//! - Front-ends parse user-facing method names with
//!   `MethodKind::from_str`.
//!
//! Testing notes
//! -------------
//! - Unit tests cover name parsing (including rejection of unknown
//!   names), registry lookup failures, and the standard stencil tables.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::differentiation::errors::{DiffError, DiffResult};

/// Supported finite-difference method kinds.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"forward"`, `"backward"`, `"central"`). Unknown names return
/// `DiffError::UnknownMethodName`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Forward,
    Backward,
    Central,
}

impl MethodKind {
    /// Stable lowercase identifier used to label raw estimates.
    pub fn id(self) -> &'static str {
        match self {
            MethodKind::Forward => "forward",
            MethodKind::Backward => "backward",
            MethodKind::Central => "central",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MethodKind {
    type Err = DiffError;

    /// Parse a method kind from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"forward"`
    /// - `"backward"`
    /// - `"central"`
    /// - Any case variant (e.g., `"Forward"`, `"BACKWARD"`).
    ///
    /// Any other value returns `DiffError::UnknownMethodName` with the valid
    /// options named.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(MethodKind::Forward),
            "backward" => Ok(MethodKind::Backward),
            "central" => Ok(MethodKind::Central),
            _ => Err(DiffError::UnknownMethodName {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'forward', 'backward', or 'central'.",
            }),
        }
    }
}

/// One term of a finite-difference stencil.
///
/// Contributes `coefficient · f(x + offset·h·d)` to the weighted sum that
/// is divided by `h` to form the estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilTerm {
    pub coefficient: f64,
    pub offset: f64,
}

/// A fixed finite-difference stencil.
///
/// Invariant: terms are chosen so that `Σ coefficient·f(x + offset·h·d) / h`
/// approximates the directional derivative along `d`; the standard
/// constructors encode the first-order quotients listed in the module docs.
#[derive(Debug, Clone, PartialEq)]
pub struct Stencil {
    terms: Vec<StencilTerm>,
}

impl Stencil {
    pub fn new(terms: Vec<StencilTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[StencilTerm] {
        &self.terms
    }

    /// Forward difference: `(f(x + h·d) − f(x)) / h`.
    pub fn forward() -> Self {
        Self::new(vec![
            StencilTerm { coefficient: 1.0, offset: 1.0 },
            StencilTerm { coefficient: -1.0, offset: 0.0 },
        ])
    }

    /// Backward difference: `(f(x) − f(x − h·d)) / h`.
    pub fn backward() -> Self {
        Self::new(vec![
            StencilTerm { coefficient: 1.0, offset: 0.0 },
            StencilTerm { coefficient: -1.0, offset: -1.0 },
        ])
    }

    /// Central difference: `(f(x + h·d) − f(x − h·d)) / (2h)`.
    pub fn central() -> Self {
        Self::new(vec![
            StencilTerm { coefficient: 0.5, offset: 1.0 },
            StencilTerm { coefficient: -0.5, offset: -1.0 },
        ])
    }
}

/// Read-only mapping from method kinds to their stencils.
///
/// Only registered kinds can be requested; resolution of an unregistered
/// kind fails eagerly with [`DiffError::UnregisteredMethod`] before any
/// target-function evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRegistry {
    table: HashMap<MethodKind, Stencil>,
}

impl MethodRegistry {
    /// Registry with the standard forward, backward, and central stencils.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(MethodKind::Forward, Stencil::forward());
        registry.register(MethodKind::Backward, Stencil::backward());
        registry.register(MethodKind::Central, Stencil::central());
        registry
    }

    /// Registry with no methods registered.
    pub fn empty() -> Self {
        Self { table: HashMap::new() }
    }

    /// Register (or replace) the stencil for a kind.
    pub fn register(&mut self, kind: MethodKind, stencil: Stencil) {
        self.table.insert(kind, stencil);
    }

    pub fn contains(&self, kind: MethodKind) -> bool {
        self.table.contains_key(&kind)
    }

    /// Resolve the stencil for a kind.
    ///
    /// # Errors
    /// Returns [`DiffError::UnregisteredMethod`] if `kind` was never
    /// registered.
    pub fn stencil(&self, kind: MethodKind) -> DiffResult<&Stencil> {
        self.table.get(&kind).ok_or(DiffError::UnregisteredMethod { method: kind })
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
