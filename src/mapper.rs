//! Affine mapping between the unit hypercube and the caller's box.
//!
//! All rectangle geometry lives in `[0,1]^D`; the objective is only ever
//! called with points mapped through [`UnitMapper::to_real`].

use crate::error::{DirectError, Result};

/// Bidirectional affine map `x = u * scale + shift`, with
/// `scale[i] = upper[i] - lower[i]` and `shift[i] = lower[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMapper {
    scale: Vec<f64>,
    shift: Vec<f64>,
}

impl UnitMapper {
    /// Build the map from per-dimension `(lower, upper)` pairs.
    ///
    /// # Errors
    /// - `DirectError::InvalidArgs` if `bounds` is empty.
    /// - `DirectError::InvalidBounds` if `upper - lower` is not strictly
    ///   positive (NaN included) in some dimension.
    pub fn new(bounds: &[(f64, f64)]) -> Result<Self> {
        if bounds.is_empty() {
            return Err(DirectError::InvalidArgs("dimension must be >= 1".into()));
        }

        let mut scale = Vec::with_capacity(bounds.len());
        let mut shift = Vec::with_capacity(bounds.len());
        for (i, &(lo, hi)) in bounds.iter().enumerate() {
            let s = hi - lo;
            if !(s > 0.0) || !s.is_finite() {
                return Err(DirectError::InvalidBounds { dim: i });
            }
            scale.push(s);
            shift.push(lo);
        }

        Ok(Self { scale, shift })
    }

    /// Number of dimensions.
    #[inline]
    pub fn dim(&self) -> usize {
        self.scale.len()
    }

    /// Per-dimension `upper - lower`.
    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    /// Per-dimension lower bound.
    pub fn shift(&self) -> &[f64] {
        &self.shift
    }

    /// Map a unit-cube point into the caller's box.
    pub fn to_real(&self, u: &[f64]) -> Vec<f64> {
        debug_assert_eq!(u.len(), self.dim());
        u.iter()
            .zip(self.scale.iter().zip(&self.shift))
            .map(|(&ui, (&s, &c))| ui * s + c)
            .collect()
    }

    /// Map a point of the caller's box into the unit cube.
    pub fn to_unit(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.dim());
        x.iter()
            .zip(self.scale.iter().zip(&self.shift))
            .map(|(&xi, (&s, &c))| (xi - c) / s)
            .collect()
    }
}
