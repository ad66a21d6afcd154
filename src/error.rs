//! Error types for the DIRECT search.
//!
//! Construction-time validation failures and objective failures are reported
//! through [`DirectError`]. A run that ends normally reports why it stopped
//! through [`DirectReturnCode`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a search run stopped.
///
/// All codes are successful terminations; failures are reported as
/// [`DirectError`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectReturnCode {
    /// Relative error against the known optimum fell below `tol`.
    GlobalFound = 1,
    /// Evaluation budget reached.
    MaxFevalReached = 2,
    /// Division budget reached.
    MaxRectDivReached = 3,
    /// Round budget reached.
    MaxIterReached = 4,
    /// The selector returned no potentially optimal rectangle.
    NoCandidates = 5,
}

impl DirectReturnCode {
    /// Returns true if the run stopped because the known optimum was reached.
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::GlobalFound)
    }

    /// Returns true if the run stopped on one of the configured budgets.
    pub fn is_budget(&self) -> bool {
        matches!(
            self,
            Self::MaxFevalReached | Self::MaxRectDivReached | Self::MaxIterReached
        )
    }

    /// Convert from the integer code.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::GlobalFound),
            2 => Some(Self::MaxFevalReached),
            3 => Some(Self::MaxRectDivReached),
            4 => Some(Self::MaxIterReached),
            5 => Some(Self::NoCandidates),
            _ => None,
        }
    }
}

impl fmt::Display for DirectReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalFound => write!(f, "Global minimum found within tolerance"),
            Self::MaxFevalReached => write!(f, "Maximum function evaluations reached"),
            Self::MaxRectDivReached => write!(f, "Maximum rectangle divisions reached"),
            Self::MaxIterReached => write!(f, "Maximum iterations reached"),
            Self::NoCandidates => write!(f, "No potentially optimal rectangles left"),
        }
    }
}

/// Errors that can occur while configuring or running a search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DirectError {
    #[error("Invalid bounds: upper - lower must be > 0 in dimension {dim}")]
    InvalidBounds { dim: usize },

    #[error("Malformed bounds: row {row} has {len} entries, expected (lower, upper)")]
    MalformedBounds { row: usize, len: usize },

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Function evaluation failed: objective returned NaN at evaluation {nfev}")]
    SampleFailed { nfev: usize },

    #[error("Invalid Hilbert curve configuration: {0}")]
    InvalidCurve(String),
}

/// Result type alias for DIRECT operations.
pub type Result<T> = std::result::Result<T, DirectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_code_roundtrip() {
        for code in [
            DirectReturnCode::GlobalFound,
            DirectReturnCode::MaxFevalReached,
            DirectReturnCode::MaxRectDivReached,
            DirectReturnCode::MaxIterReached,
            DirectReturnCode::NoCandidates,
        ] {
            assert_eq!(DirectReturnCode::from_i32(code as i32), Some(code));
        }
        assert_eq!(DirectReturnCode::from_i32(0), None);
        assert_eq!(DirectReturnCode::from_i32(-1), None);
    }

    #[test]
    fn test_return_code_classification() {
        assert!(DirectReturnCode::GlobalFound.is_converged());
        assert!(!DirectReturnCode::GlobalFound.is_budget());
        assert!(DirectReturnCode::MaxFevalReached.is_budget());
        assert!(DirectReturnCode::MaxRectDivReached.is_budget());
        assert!(DirectReturnCode::MaxIterReached.is_budget());
        assert!(!DirectReturnCode::NoCandidates.is_budget());
    }

    #[test]
    fn test_error_messages() {
        let e = DirectError::InvalidBounds { dim: 2 };
        assert!(e.to_string().contains("dimension 2"));
        let e = DirectError::MalformedBounds { row: 1, len: 3 };
        assert!(e.to_string().contains("row 1 has 3 entries"));
        let e = DirectError::SampleFailed { nfev: 7 };
        assert!(e.to_string().contains("evaluation 7"));
    }

    #[test]
    fn test_return_code_display() {
        assert_eq!(
            format!("{}", DirectReturnCode::GlobalFound),
            "Global minimum found within tolerance"
        );
        assert_eq!(
            format!("{}", DirectReturnCode::MaxRectDivReached),
            "Maximum rectangle divisions reached"
        );
    }
}
