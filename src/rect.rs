//! Hyperrectangles in unit-cube coordinates and the size keys used to group them.

use std::cmp::Ordering;

use crate::types::SizeKeyMode;

/// Unique identifier of a rectangle within one search run.
pub type RectId = usize;

/// An axis-aligned hyperrectangle in `[0,1]^D`.
///
/// `depths[i]` counts how many times side `i` was trisected, so
/// `sides[i] == 3^-depths[i]` up to rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: RectId,
    /// Evaluation point.
    pub center: Vec<f64>,
    /// Objective value at `center`, in the internal minimization convention.
    pub value: f64,
    /// Full side length per dimension.
    pub sides: Vec<f64>,
    /// Trisection depth per dimension.
    pub depths: Vec<u32>,
}

impl Rectangle {
    /// The whole unit cube: centroid center, unit sides.
    ///
    /// `id` must come from the partition the rectangle will live in; outside
    /// the crate use [`RectanglePartition::new_root`](crate::storage::RectanglePartition::new_root).
    pub(crate) fn root(id: RectId, dim: usize, value: f64) -> Self {
        Self {
            id,
            center: vec![0.5; dim],
            value,
            sides: vec![1.0; dim],
            depths: vec![0; dim],
        }
    }

    /// A copy of `parent` whose center is moved by `offset` along `dim`.
    ///
    /// Sides are inherited unshrunk.
    pub(crate) fn offset_child(parent: &Rectangle, id: RectId, dim: usize, offset: f64) -> Self {
        let mut center = parent.center.clone();
        center[dim] += offset;
        Self {
            id,
            center,
            value: f64::INFINITY,
            sides: parent.sides.clone(),
            depths: parent.depths.clone(),
        }
    }

    pub fn id(&self) -> RectId {
        self.id
    }

    pub fn dim(&self) -> usize {
        self.sides.len()
    }

    /// Squared half-diagonal: `Σ (side/2)^2`.
    pub fn size(&self) -> f64 {
        self.sides.iter().map(|&s| (s * 0.5) * (s * 0.5)).sum()
    }

    /// Longest side length.
    pub fn max_side(&self) -> f64 {
        self.sides.iter().cloned().fold(0.0_f64, f64::max)
    }

    /// Indices of every side equal to the longest, ascending.
    pub fn longest_dims(&self) -> Vec<usize> {
        let maxlen = self.max_side();
        self.sides
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == maxlen)
            .map(|(i, _)| i)
            .collect()
    }

    /// Divide side `dim` by three.
    #[inline]
    pub fn trisect(&mut self, dim: usize) {
        self.sides[dim] /= 3.0;
        self.depths[dim] += 1;
    }

    /// Grouping key under the given mode.
    pub fn key(&self, mode: SizeKeyMode) -> SizeKey {
        match mode {
            SizeKeyMode::Float => SizeKey::Float(FloatKey(self.size())),
            SizeKeyMode::Exact => SizeKey::Exact(ExactSize::from_depths(&self.depths)),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Size keys
// ──────────────────────────────────────────────────────────────────────────────

/// Totally ordered wrapper around a floating size.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(pub f64);

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Exact size `4·size = Σ_k digits[k] · 9^-k`.
///
/// Digits past index 0 are kept below 9 and trailing zeros are trimmed, so the
/// representation is canonical and lexicographic order is numeric order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExactSize {
    digits: Vec<u64>,
}

impl ExactSize {
    /// Build from per-dimension trisection depths (`side_i = 3^-depth_i`).
    pub fn from_depths(depths: &[u32]) -> Self {
        let deepest = depths.iter().copied().max().unwrap_or(0) as usize;
        let mut digits = vec![0u64; deepest + 1];
        for &d in depths {
            digits[d as usize] += 1;
        }
        for k in (1..digits.len()).rev() {
            let carry = digits[k] / 9;
            digits[k] %= 9;
            digits[k - 1] += carry;
        }
        while digits.len() > 1 && digits.last() == Some(&0) {
            digits.pop();
        }
        Self { digits }
    }

    pub fn digits(&self) -> &[u64] {
        &self.digits
    }

    /// The size as a float.
    pub fn to_f64(&self) -> f64 {
        let mut weight = 0.25;
        let mut total = 0.0;
        for &d in &self.digits {
            total += d as f64 * weight;
            weight /= 9.0;
        }
        total
    }
}

/// Key under which a rectangle is grouped in the partition.
///
/// Within one run every key has the same variant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SizeKey {
    Float(FloatKey),
    Exact(ExactSize),
}

impl SizeKey {
    /// The size as used in slope computations.
    pub fn size(&self) -> f64 {
        match self {
            SizeKey::Float(k) => k.0,
            SizeKey::Exact(e) => e.to_f64(),
        }
    }
}
