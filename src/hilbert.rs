//! Hilbert-curve indexing of a `dims`-dimensional grid with `2^bits` cells
//! per side.
//!
//! Maps grid cells to positions along the curve and back, using Skilling's
//! transpose formulation ("Programming the Hilbert curve", AIP Conf. Proc.
//! 707, 2004). Consecutive indices always land on face-adjacent cells, which
//! makes the curve usable as a one-dimensional coordinate over the unit cube.
//!
//! The search loop does not use this module.

use crate::error::{DirectError, Result};
use crate::mapper::UnitMapper;

/// Converter between grid coordinates and Hilbert indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HilbertIndexer {
    bits: u32,
    dims: usize,
}

impl HilbertIndexer {
    /// # Errors
    /// `DirectError::InvalidCurve` when `bits` is 0 or above 64, `dims` is 0,
    /// or the index would need more than 128 bits.
    pub fn new(bits: u32, dims: usize) -> Result<Self> {
        if bits == 0 || bits > 64 {
            return Err(DirectError::InvalidCurve(format!(
                "bits must be in 1..=64, got {}",
                bits
            )));
        }
        if dims == 0 {
            return Err(DirectError::InvalidCurve("dims must be >= 1".into()));
        }
        if (bits as usize).saturating_mul(dims) > 128 {
            return Err(DirectError::InvalidCurve(format!(
                "{} bits x {} dims does not fit a 128-bit index",
                bits, dims
            )));
        }
        Ok(Self { bits, dims })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Largest grid coordinate along one axis.
    pub fn max_coord(&self) -> u64 {
        u64::MAX >> (64 - self.bits)
    }

    /// Largest index on the curve.
    pub fn max_index(&self) -> u128 {
        u128::MAX >> (128 - self.bits as usize * self.dims)
    }

    /// Position of a grid cell along the curve.
    ///
    /// # Errors
    /// `DirectError::InvalidCurve` on a wrong coordinate count or a coordinate
    /// past [`max_coord`](Self::max_coord).
    pub fn coords_to_index(&self, coords: &[u64]) -> Result<u128> {
        if coords.len() != self.dims {
            return Err(DirectError::InvalidCurve(format!(
                "expected {} coordinates, got {}",
                self.dims,
                coords.len()
            )));
        }
        if let Some(&c) = coords.iter().find(|&&c| c > self.max_coord()) {
            return Err(DirectError::InvalidCurve(format!(
                "coordinate {} exceeds {}",
                c,
                self.max_coord()
            )));
        }
        let mut x = coords.to_vec();
        self.axes_to_transpose(&mut x);
        Ok(self.interleave(&x))
    }

    /// Grid cell at a position along the curve.
    ///
    /// # Errors
    /// `DirectError::InvalidCurve` if `index` exceeds [`max_index`](Self::max_index).
    pub fn index_to_coords(&self, index: u128) -> Result<Vec<u64>> {
        if index > self.max_index() {
            return Err(DirectError::InvalidCurve(format!(
                "index {} exceeds {}",
                index,
                self.max_index()
            )));
        }
        let mut x = self.deinterleave(index);
        self.transpose_to_axes(&mut x);
        Ok(x)
    }

    /// Index of the cell holding a unit-cube point. Points outside
    /// `[0, 1)` are clamped to the boundary cells.
    pub fn unit_to_index(&self, unit: &[f64]) -> Result<u128> {
        let side = f64::from(self.bits).exp2();
        let max = self.max_coord();
        let coords: Vec<u64> = unit
            .iter()
            .map(|&u| {
                let c = (u * side).floor();
                if !(c > 0.0) {
                    0
                } else if c >= side {
                    max
                } else {
                    (c as u64).min(max)
                }
            })
            .collect();
        self.coords_to_index(&coords)
    }

    /// Lower corner of the cell at `index`, in unit-cube coordinates.
    pub fn index_to_unit(&self, index: u128) -> Result<Vec<f64>> {
        let side = f64::from(self.bits).exp2();
        Ok(self
            .index_to_coords(index)?
            .into_iter()
            .map(|c| c as f64 / side)
            .collect())
    }

    /// Lower corner of the cell at `index`, in the mapper's box.
    pub fn index_to_real(&self, index: u128, mapper: &UnitMapper) -> Result<Vec<f64>> {
        if mapper.dim() != self.dims {
            return Err(DirectError::InvalidCurve(format!(
                "mapper has {} dimensions, curve has {}",
                mapper.dim(),
                self.dims
            )));
        }
        Ok(mapper.to_real(&self.index_to_unit(index)?))
    }

    // ── transpose form ──────────────────────────────────────────────────────

    fn axes_to_transpose(&self, x: &mut [u64]) {
        let n = x.len();
        // inverse undo
        for k in (1..self.bits).rev() {
            let q = 1u64 << k;
            let p = q - 1;
            for i in 0..n {
                if x[i] & q != 0 {
                    x[0] ^= p;
                } else {
                    let t = (x[0] ^ x[i]) & p;
                    x[0] ^= t;
                    x[i] ^= t;
                }
            }
        }
        // gray encode
        for i in 1..n {
            x[i] ^= x[i - 1];
        }
        let mut t = 0;
        for k in (1..self.bits).rev() {
            let q = 1u64 << k;
            if x[n - 1] & q != 0 {
                t ^= q - 1;
            }
        }
        for xi in x.iter_mut() {
            *xi ^= t;
        }
    }

    fn transpose_to_axes(&self, x: &mut [u64]) {
        let n = x.len();
        // gray decode
        let t = x[n - 1] >> 1;
        for i in (1..n).rev() {
            x[i] ^= x[i - 1];
        }
        x[0] ^= t;
        // undo excess work
        for k in 1..self.bits {
            let q = 1u64 << k;
            let p = q - 1;
            for i in (0..n).rev() {
                if x[i] & q != 0 {
                    x[0] ^= p;
                } else {
                    let t = (x[0] ^ x[i]) & p;
                    x[0] ^= t;
                    x[i] ^= t;
                }
            }
        }
    }

    /// Bit `j` of axis `i` lands at index bit `j * dims + (dims - 1 - i)`.
    fn interleave(&self, x: &[u64]) -> u128 {
        let mut h = 0u128;
        for j in (0..self.bits).rev() {
            for &xi in x {
                h = (h << 1) | u128::from((xi >> j) & 1);
            }
        }
        h
    }

    fn deinterleave(&self, h: u128) -> Vec<u64> {
        let n = self.dims;
        let mut x = vec![0u64; n];
        for j in 0..self.bits as usize {
            for (i, xi) in x.iter_mut().enumerate() {
                let bit = (h >> (j * n + n - 1 - i)) & 1;
                *xi |= (bit as u64) << j;
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manhattan(a: &[u64], b: &[u64]) -> u64 {
        a.iter().zip(b).map(|(&p, &q)| p.abs_diff(q)).sum()
    }

    #[test]
    fn test_first_order_2d() {
        let h = HilbertIndexer::new(1, 2).unwrap();
        let cells: Vec<Vec<u64>> = (0..4).map(|i| h.index_to_coords(i).unwrap()).collect();
        assert_eq!(cells, vec![vec![0, 0], vec![0, 1], vec![1, 1], vec![1, 0]]);
    }

    #[test]
    fn test_origin_is_index_zero() {
        for (bits, dims) in [(1, 1), (5, 2), (4, 3), (16, 8)] {
            let h = HilbertIndexer::new(bits, dims).unwrap();
            assert_eq!(h.index_to_coords(0).unwrap(), vec![0; dims]);
            assert_eq!(h.coords_to_index(&vec![0; dims]).unwrap(), 0);
        }
    }

    #[test]
    fn test_roundtrip_and_adjacency() {
        for (bits, dims) in [(3, 2), (2, 3), (5, 2), (1, 4)] {
            let h = HilbertIndexer::new(bits, dims).unwrap();
            let mut prev: Option<Vec<u64>> = None;
            for idx in 0..=h.max_index() {
                let c = h.index_to_coords(idx).unwrap();
                assert_eq!(h.coords_to_index(&c).unwrap(), idx, "bits={} dims={}", bits, dims);
                if let Some(p) = prev {
                    assert_eq!(manhattan(&p, &c), 1, "step {} -> {}", idx - 1, idx);
                }
                prev = Some(c);
            }
        }
    }

    #[test]
    fn test_every_cell_visited_once() {
        let h = HilbertIndexer::new(3, 2).unwrap();
        let mut seen = vec![false; 64];
        for idx in 0..64 {
            let c = h.index_to_coords(idx).unwrap();
            let slot = (c[0] * 8 + c[1]) as usize;
            assert!(!seen[slot]);
            seen[slot] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_wide_index() {
        let h = HilbertIndexer::new(32, 4).unwrap();
        assert_eq!(h.max_index(), u128::MAX);
        let coords = vec![123_456, 7, 4_000_000_000, 99];
        let idx = h.coords_to_index(&coords).unwrap();
        assert_eq!(h.index_to_coords(idx).unwrap(), coords);
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(HilbertIndexer::new(0, 2), Err(DirectError::InvalidCurve(_))));
        assert!(matches!(HilbertIndexer::new(65, 1), Err(DirectError::InvalidCurve(_))));
        assert!(matches!(HilbertIndexer::new(5, 0), Err(DirectError::InvalidCurve(_))));
        assert!(matches!(HilbertIndexer::new(33, 4), Err(DirectError::InvalidCurve(_))));
        assert!(HilbertIndexer::new(64, 2).is_ok());
    }

    #[test]
    fn test_out_of_range_inputs() {
        let h = HilbertIndexer::new(2, 2).unwrap();
        assert!(h.coords_to_index(&[0, 4]).is_err());
        assert!(h.coords_to_index(&[0]).is_err());
        assert!(h.index_to_coords(16).is_err());
    }

    #[test]
    fn test_unit_cells_and_clamping() {
        let h = HilbertIndexer::new(5, 2).unwrap();
        let inside = h.unit_to_index(&[0.49, 0.51]).unwrap();
        assert_eq!(h.index_to_unit(inside).unwrap(), vec![15.0 / 32.0, 16.0 / 32.0]);

        let clamped = h.unit_to_index(&[1.0, -0.2]).unwrap();
        assert_eq!(h.index_to_coords(clamped).unwrap(), vec![31, 0]);
    }

    #[test]
    fn test_index_to_real() {
        let h = HilbertIndexer::new(5, 2).unwrap();
        let m = UnitMapper::new(&[(-2.0, 2.0), (0.0, 32.0)]).unwrap();
        let idx = h.coords_to_index(&[16, 3]).unwrap();
        assert_eq!(h.index_to_real(idx, &m).unwrap(), vec![0.0, 3.0]);

        let m3 = UnitMapper::new(&[(0.0, 1.0); 3]).unwrap();
        assert!(h.index_to_real(idx, &m3).is_err());
    }
}
