//! Selection of potentially optimal rectangles.
//!
//! Works on the border of the partition: one `(size, best_value)` point per
//! group, ascending by size. A group is selected when its point lies on the
//! lower convex hull of the border (first condition) and the hull slope
//! promises enough improvement over the current best (second condition).
//!
//! For border index `i`:
//! - `lb_i = max_{size_j < size_i} (f_i - f_j) / (size_i - size_j)`, or
//!   [`LOWER_SENTINEL`] when no smaller group exists;
//! - `ub_i = min_{size_j > size_i} (f_j - f_i) / (size_j - size_i)`, or
//!   [`UPPER_SENTINEL`] when no larger group exists;
//! - hull candidate iff `lb_i <= ub_i`;
//! - accepted iff `(fmin - f_i + size_i * ub_i) / |fmin| >= epsilon`, or, when
//!   `fmin == 0`, iff `f_i - size_i * ub_i <= 0`.

use crate::rect::{RectId, SizeKey};
use crate::storage::RectanglePartition;

/// Stand-in for `-inf` slope bound of the smallest group.
pub const LOWER_SENTINEL: f64 = -1.976e14;

/// Stand-in for `+inf` slope bound of the largest group.
pub const UPPER_SENTINEL: f64 = 1.976e14;

/// A group head chosen for division.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Key of the group the rectangle was filed under when selected.
    pub key: SizeKey,
    /// Id of the group head.
    pub id: RectId,
    pub size: f64,
    pub value: f64,
}

/// Potentially-optimal test with a fixed balance parameter.
#[derive(Debug, Clone, Copy)]
pub struct OptimalSelector {
    epsilon: f64,
}

impl OptimalSelector {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Heads of every potentially optimal group, ascending by size.
    pub fn select(&self, partition: &RectanglePartition, curr_opt: f64) -> Vec<Candidate> {
        let border: Vec<(f64, f64)> = partition.groups_ascending().collect();
        let chosen = self.potentially_optimal(&border, curr_opt);

        let mut out = Vec::with_capacity(chosen.len());
        let mut next = chosen.iter().copied().peekable();
        for (i, (key, head)) in partition.heads_ascending().enumerate() {
            if next.peek() == Some(&i) {
                next.next();
                out.push(Candidate {
                    key: key.clone(),
                    id: head.id(),
                    size: border[i].0,
                    value: border[i].1,
                });
            }
        }
        out
    }

    /// Indices into `border` passing both the hull and the balance test.
    pub fn potentially_optimal(&self, border: &[(f64, f64)], curr_opt: f64) -> Vec<usize> {
        let lb = lower_bounds(border);
        let ub = upper_bounds(border);

        (0..border.len())
            .filter(|&i| lb[i] <= ub[i])
            .filter(|&i| {
                let (size, value) = border[i];
                if curr_opt != 0.0 {
                    (curr_opt - value + size * ub[i]) / curr_opt.abs() >= self.epsilon
                } else {
                    value - size * ub[i] <= 0.0
                }
            })
            .collect()
    }
}

/// Largest slope from any smaller group up to each group.
pub fn lower_bounds(border: &[(f64, f64)]) -> Vec<f64> {
    border
        .iter()
        .map(|&(si, fi)| {
            border
                .iter()
                .filter(|&&(sj, _)| sj < si)
                .map(|&(sj, fj)| (fi - fj) / (si - sj))
                .fold(None, |acc: Option<f64>, k| Some(acc.map_or(k, |a| a.max(k))))
                .unwrap_or(LOWER_SENTINEL)
        })
        .collect()
}

/// Smallest slope from each group up to any larger group.
pub fn upper_bounds(border: &[(f64, f64)]) -> Vec<f64> {
    border
        .iter()
        .map(|&(si, fi)| {
            border
                .iter()
                .filter(|&&(sj, _)| sj > si)
                .map(|&(sj, fj)| (fj - fi) / (sj - si))
                .fold(None, |acc: Option<f64>, k| Some(acc.map_or(k, |a| a.min(k))))
                .unwrap_or(UPPER_SENTINEL)
        })
        .collect()
}
