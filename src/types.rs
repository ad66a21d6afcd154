//! Core type definitions: bounds, objective signature, options, and results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DirectError, DirectReturnCode, Result};

// ──────────────────────────────────────────────────────────────────────────────
// Type Aliases
// ──────────────────────────────────────────────────────────────────────────────

/// Bounds for each dimension: `Vec<(lower, upper)>`.
pub type Bounds = Vec<(f64, f64)>;

/// Objective function signature.
///
/// Takes a point in the caller's domain (dimension D) and returns its value.
/// Must be total over the box described by the bounds. A `NaN` return is
/// treated as a failed evaluation and aborts the run.
pub type ObjectiveFn = dyn Fn(&[f64]) -> f64 + Send + Sync;

/// Convert a D×2 matrix (one `[lower, upper]` row per dimension) into [`Bounds`].
///
/// # Errors
/// Returns `DirectError::MalformedBounds` for the first row whose length is not 2.
pub fn bounds_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Bounds> {
    rows.iter()
        .enumerate()
        .map(|(row, r)| match r.as_ref() {
            [lo, hi] => Ok((*lo, *hi)),
            other => Err(DirectError::MalformedBounds {
                row,
                len: other.len(),
            }),
        })
        .collect()
}

// ──────────────────────────────────────────────────────────────────────────────
// Options
// ──────────────────────────────────────────────────────────────────────────────

/// Oracle knowledge about the problem: optimization sense and, optionally,
/// the known optimal value.
///
/// The known value only drives termination, never the search itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalMin {
    /// `true` to minimize, `false` to maximize.
    pub minimize: bool,
    /// Whether `value` holds the known optimum.
    pub known: bool,
    /// The known optimum, in the caller's sign convention.
    pub value: Option<f64>,
}

impl GlobalMin {
    /// Minimization with unknown optimum.
    pub fn minimize() -> Self {
        Self::default()
    }

    /// Maximization with unknown optimum.
    pub fn maximize() -> Self {
        Self {
            minimize: false,
            ..Self::default()
        }
    }

    /// Minimization with a known optimum.
    pub fn known(value: f64) -> Self {
        Self {
            minimize: true,
            known: true,
            value: Some(value),
        }
    }

    /// Switch to maximization, keeping the known optimum.
    pub fn maximizing(mut self) -> Self {
        self.minimize = false;
        self
    }

    /// Known optimum expressed in the internal (minimization) sign convention.
    pub(crate) fn internal_target(&self) -> Option<f64> {
        if !self.known {
            return None;
        }
        self.value
            .map(|v| if self.minimize { v } else { -v })
    }
}

impl Default for GlobalMin {
    fn default() -> Self {
        Self {
            minimize: true,
            known: false,
            value: None,
        }
    }
}

/// How rectangles are grouped by size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeKeyMode {
    /// Key on the floating squared half-diagonal.
    #[default]
    Float,
    /// Key on the exact rational size derived from per-dimension trisection depths.
    Exact,
}

/// Configuration options for the DIRECT search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectOptions {
    /// Global/local balance constant for the potentially-optimal test.
    /// Larger values bias toward exploring large rectangles.
    pub epsilon: f64,

    /// Maximum number of function evaluations, root included.
    /// Only enforced when no known optimum is supplied.
    pub max_feval: usize,

    /// Maximum number of rounds.
    /// Only enforced when no known optimum is supplied.
    pub max_iter: usize,

    /// Maximum number of longest-side divisions.
    /// Only enforced when no known optimum is supplied.
    pub max_rectdiv: usize,

    /// Optimization sense and optional known optimum.
    pub globalmin: GlobalMin,

    /// Relative-error threshold against the known optimum.
    pub tol: f64,

    /// Record every evaluated point and its (sign-corrected) value.
    pub record_history: bool,

    /// Grouping key used by the rectangle partition.
    pub size_key: SizeKeyMode,
}

impl Default for DirectOptions {
    fn default() -> Self {
        Self {
            epsilon: 1e-4,
            max_feval: 200,
            max_iter: 10,
            max_rectdiv: 100,
            globalmin: GlobalMin::default(),
            tol: 1e-2,
            record_history: false,
            size_key: SizeKeyMode::Float,
        }
    }
}

impl DirectOptions {
    /// Check the options that can be checked without the bounds.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(DirectError::InvalidArgs(format!(
                "epsilon must be finite and >= 0, got {}",
                self.epsilon
            )));
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(DirectError::InvalidArgs(format!(
                "tol must be finite and >= 0, got {}",
                self.tol
            )));
        }
        if self.globalmin.known {
            match self.globalmin.value {
                Some(v) if v.is_finite() => {}
                Some(v) => {
                    return Err(DirectError::InvalidArgs(format!(
                        "known optimum must be finite, got {}",
                        v
                    )))
                }
                None => {
                    return Err(DirectError::InvalidArgs(
                        "globalmin.known is set but no value was given".into(),
                    ))
                }
            }
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Result
// ──────────────────────────────────────────────────────────────────────────────

/// One evaluation of the objective, in the caller's domain and sign convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    /// Evaluated point.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub f: f64,
}

/// Result of a DIRECT search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectResult {
    /// Best point found, in the caller's domain.
    pub x: Vec<f64>,

    /// Best function value found (sign-corrected for maximization).
    pub fun: f64,

    /// Total number of function evaluations, root included.
    pub nfev: usize,

    /// Number of rounds started.
    pub nit: usize,

    /// Number of longest-side divisions performed.
    pub ndiv: usize,

    /// Why the run stopped.
    pub return_code: DirectReturnCode,

    /// Human-readable message describing the termination reason.
    pub message: String,

    /// Every evaluation in order, when history recording was enabled.
    pub history: Option<Vec<EvalRecord>>,
}

impl DirectResult {
    /// Create a new result from optimization output.
    pub fn new(
        x: Vec<f64>,
        fun: f64,
        nfev: usize,
        nit: usize,
        ndiv: usize,
        return_code: DirectReturnCode,
    ) -> Self {
        Self {
            x,
            fun,
            nfev,
            nit,
            ndiv,
            return_code,
            message: return_code.to_string(),
            history: None,
        }
    }

    /// Attach the evaluation history.
    pub fn with_history(mut self, history: Option<Vec<EvalRecord>>) -> Self {
        self.history = history;
        self
    }
}

impl fmt::Display for DirectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DirectResult {{")?;
        writeln!(f, "  message: {}", self.message)?;
        writeln!(f, "  fun: {:.15e}", self.fun)?;
        write!(f, "  x: [")?;
        for (i, xi) in self.x.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.15e}", xi)?;
        }
        writeln!(f, "]")?;
        writeln!(f, "  nfev: {}", self.nfev)?;
        writeln!(f, "  nit: {}", self.nit)?;
        writeln!(f, "  ndiv: {}", self.ndiv)?;
        write!(f, "  return_code: {:?}", self.return_code)?;
        if let Some(ref h) = self.history {
            write!(f, "\n  history: {} records", h.len())?;
        }
        write!(f, "\n}}")
    }
}
