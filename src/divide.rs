//! Trisection of selected rectangles.
//!
//! A selected rectangle is split along every side tied for longest. Both
//! offset centers along each such side are evaluated, the sides are ranked by
//! the best value their children found, and sides are shrunk so that the
//! best-ranked side produces the largest children:
//!
//! - children of the rank-`r` side are shrunk along ranks `0..=r`;
//! - the parent keeps its center and is shrunk along every longest side.
//!
//! The termination rule is checked after every single evaluation. A stop
//! mid-division puts the parent back unchanged and reports the reason in the
//! returned [`DivisionOutcome`].

use std::cmp::Ordering;

use log::trace;

use crate::error::{DirectError, DirectReturnCode, Result};
use crate::mapper::UnitMapper;
use crate::rect::Rectangle;
use crate::select::Candidate;
use crate::storage::RectanglePartition;
use crate::types::{EvalRecord, ObjectiveFn};

// ──────────────────────────────────────────────────────────────────────────────
// Search state
// ──────────────────────────────────────────────────────────────────────────────

/// Counters and best-so-far bookkeeping of one run.
///
/// Values are in the internal minimization convention.
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Function evaluations, root included.
    pub nfev: usize,
    /// Longest-side divisions.
    pub ndiv: usize,
    /// Rounds started.
    pub nit: usize,
    /// Best value seen.
    pub best_value: f64,
    /// Best point in unit-cube coordinates.
    pub best_unit: Vec<f64>,
    /// Best point in the caller's domain.
    pub best_x: Vec<f64>,
    history: Option<Vec<EvalRecord>>,
}

impl SearchState {
    pub fn new(dim: usize, record_history: bool) -> Self {
        Self {
            nfev: 0,
            ndiv: 0,
            nit: 0,
            best_value: f64::INFINITY,
            best_unit: vec![0.0; dim],
            best_x: vec![0.0; dim],
            history: record_history.then(Vec::new),
        }
    }

    pub fn history(&self) -> Option<&[EvalRecord]> {
        self.history.as_deref()
    }

    pub fn take_history(&mut self) -> Option<Vec<EvalRecord>> {
        self.history.take()
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Termination rule
// ──────────────────────────────────────────────────────────────────────────────

/// Conditions checked after every evaluation.
///
/// With a known optimum only the relative error counts; otherwise the
/// evaluation and division budgets do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopRule {
    /// Known optimum in the internal minimization convention.
    pub target: Option<f64>,
    pub tol: f64,
    pub max_feval: usize,
    pub max_rectdiv: usize,
}

impl StopRule {
    /// Relative error of `best` against the target, or `best` itself when
    /// the target is exactly zero.
    pub fn error(target: f64, best: f64) -> f64 {
        if target != 0.0 {
            (best - target) / target.abs()
        } else {
            best
        }
    }

    pub fn check(&self, state: &SearchState) -> Option<DirectReturnCode> {
        match self.target {
            Some(target) => {
                if Self::error(target, state.best_value) < self.tol {
                    Some(DirectReturnCode::GlobalFound)
                } else {
                    None
                }
            }
            None => {
                if state.nfev >= self.max_feval {
                    Some(DirectReturnCode::MaxFevalReached)
                } else if state.ndiv >= self.max_rectdiv {
                    Some(DirectReturnCode::MaxRectDivReached)
                } else {
                    None
                }
            }
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Evaluation
// ──────────────────────────────────────────────────────────────────────────────

/// Calls the (already sign-adjusted) objective at unit-cube points.
pub struct Evaluator<'a> {
    func: &'a ObjectiveFn,
    mapper: &'a UnitMapper,
    minimize: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(func: &'a ObjectiveFn, mapper: &'a UnitMapper, minimize: bool) -> Self {
        Self {
            func,
            mapper,
            minimize,
        }
    }

    /// Convert an internal value back to the caller's sign convention.
    #[inline]
    pub fn true_sign(&self, value: f64) -> f64 {
        if self.minimize {
            value
        } else {
            -value
        }
    }

    /// Evaluate at `unit`, bump the counter, and update the best point.
    ///
    /// # Errors
    /// `DirectError::SampleFailed` if the objective returns NaN.
    pub fn evaluate(&self, state: &mut SearchState, unit: &[f64]) -> Result<f64> {
        let x = self.mapper.to_real(unit);
        let f = (self.func)(&x);
        state.nfev += 1;
        if f.is_nan() {
            return Err(DirectError::SampleFailed { nfev: state.nfev });
        }
        if let Some(ref mut h) = state.history {
            h.push(EvalRecord {
                x: x.clone(),
                f: self.true_sign(f),
            });
        }
        if f < state.best_value {
            state.best_value = f;
            state.best_unit.copy_from_slice(unit);
            state.best_x = x;
        }
        Ok(f)
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Division
// ──────────────────────────────────────────────────────────────────────────────

/// What one division call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DivisionOutcome {
    /// Rectangles (re)inserted into the partition: `2k + 1` for `k` longest
    /// sides, or 0 when the call was cut short.
    pub produced: usize,
    /// Set when a termination condition fired during the call.
    pub stop: Option<DirectReturnCode>,
}

impl DivisionOutcome {
    fn done(produced: usize) -> Self {
        Self {
            produced,
            stop: None,
        }
    }

    fn stopped(code: DirectReturnCode) -> Self {
        Self {
            produced: 0,
            stop: Some(code),
        }
    }
}

/// Splits one selected rectangle at a time.
pub struct RectangleDivider<'a> {
    eval: Evaluator<'a>,
    stop: StopRule,
}

impl<'a> RectangleDivider<'a> {
    pub fn new(eval: Evaluator<'a>, stop: StopRule) -> Self {
        Self { eval, stop }
    }

    pub fn evaluator(&self) -> &Evaluator<'a> {
        &self.eval
    }

    /// Divide the rectangle named by `cand`.
    ///
    /// A candidate that is no longer in the partition yields an empty outcome.
    pub fn divide(
        &self,
        partition: &mut RectanglePartition,
        state: &mut SearchState,
        cand: &Candidate,
    ) -> Result<DivisionOutcome> {
        let mut parent = match partition.remove_by_key(&cand.key, cand.id) {
            Some(r) => r,
            None => return Ok(DivisionOutcome::done(0)),
        };

        let gap = parent.max_side() / 3.0;
        let dims = parent.longest_dims();

        // (plus, minus) children per longest side, ascending side index
        let mut children: Vec<(Rectangle, Rectangle)> = Vec::with_capacity(dims.len());
        for &d in &dims {
            let mut plus = Rectangle::offset_child(&parent, partition.alloc_id(), d, gap);
            plus.value = self.eval.evaluate(state, &plus.center)?;
            if let Some(code) = self.stop.check(state) {
                partition.insert(parent);
                return Ok(DivisionOutcome::stopped(code));
            }

            let mut minus = Rectangle::offset_child(&parent, partition.alloc_id(), d, -gap);
            minus.value = self.eval.evaluate(state, &minus.center)?;
            if let Some(code) = self.stop.check(state) {
                partition.insert(parent);
                return Ok(DivisionOutcome::stopped(code));
            }

            children.push((plus, minus));
        }

        // stable sort keeps ascending side index on ties; -0.0 ties with 0.0
        // and values are never NaN here
        let mut order: Vec<usize> = (0..dims.len()).collect();
        order.sort_by(|&a, &b| {
            let fa = children[a].0.value.min(children[a].1.value);
            let fb = children[b].0.value.min(children[b].1.value);
            fa.partial_cmp(&fb).unwrap_or(Ordering::Equal)
        });
        trace!(
            "divide rect={} dims={:?} rank={:?}",
            parent.id(),
            dims,
            order.iter().map(|&o| dims[o]).collect::<Vec<_>>()
        );

        for (r, &slot) in order.iter().enumerate() {
            state.ndiv += 1;
            let (plus, minus) = &mut children[slot];
            for &earlier in &order[..=r] {
                plus.trisect(dims[earlier]);
                minus.trisect(dims[earlier]);
            }
        }

        for &d in &dims {
            parent.trisect(d);
        }

        let produced = 2 * children.len() + 1;
        for (plus, minus) in children {
            partition.insert(plus);
            partition.insert(minus);
        }
        partition.insert(parent);

        Ok(DivisionOutcome::done(produced))
    }
}
