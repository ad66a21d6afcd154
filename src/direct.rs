//! The DIRECT search loop.
//!
//! | Step                 | Where                                   |
//! |----------------------|-----------------------------------------|
//! | bounds to unit cube  | [`UnitMapper`]                          |
//! | root evaluation      | `Direct::search()`                      |
//! | selection            | [`OptimalSelector::select`]             |
//! | trisection           | [`RectangleDivider::divide`]            |
//! | termination          | [`StopRule::check`], plus the round cap |
//!
//! Each round snapshots the potentially optimal set first and then divides
//! its members one after another. The partition changes live while that
//! happens; the snapshot does not.

use std::sync::Arc;

use log::{debug, info};

use crate::divide::{Evaluator, RectangleDivider, SearchState, StopRule};
use crate::error::{DirectReturnCode, Result};
use crate::mapper::UnitMapper;
use crate::rect::Rectangle;
use crate::select::OptimalSelector;
use crate::storage::RectanglePartition;
use crate::types::{Bounds, DirectOptions, DirectResult, ObjectiveFn};

/// Arc-wrapped objective, already negated for maximization.
type ArcObjFn = Arc<ObjectiveFn>;

/// A configured DIRECT optimizer.
///
/// Construction validates everything; [`Direct::optimize`] can then be called
/// any number of times and always reproduces the same run.
pub struct Direct {
    func: ArcObjFn,
    mapper: UnitMapper,
    options: DirectOptions,
    selector: OptimalSelector,
    stop: StopRule,
}

impl Direct {
    /// Create a new optimizer.
    ///
    /// # Arguments
    /// * `func` - Objective taking a point in the caller's domain
    /// * `bounds` - `(lower, upper)` per dimension
    /// * `options` - Search configuration
    ///
    /// # Errors
    /// - `DirectError::InvalidArgs` for zero dimensions or bad option values.
    /// - `DirectError::InvalidBounds` if `upper - lower` is not positive.
    pub fn new(
        func: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
        bounds: &Bounds,
        options: DirectOptions,
    ) -> Result<Self> {
        options.validate()?;
        let mapper = UnitMapper::new(bounds)?;

        let func: ArcObjFn = if options.globalmin.minimize {
            Arc::new(func)
        } else {
            Arc::new(move |x: &[f64]| -func(x))
        };

        let stop = StopRule {
            target: options.globalmin.internal_target(),
            tol: options.tol,
            max_feval: options.max_feval,
            max_rectdiv: options.max_rectdiv,
        };

        Ok(Self {
            func,
            mapper,
            selector: OptimalSelector::new(options.epsilon),
            options,
            stop,
        })
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.mapper.dim()
    }

    pub fn mapper(&self) -> &UnitMapper {
        &self.mapper
    }

    pub fn options(&self) -> &DirectOptions {
        &self.options
    }

    /// Run the search and return the best point found.
    ///
    /// # Errors
    /// `DirectError::SampleFailed` if the objective returns NaN.
    pub fn optimize(&self) -> Result<DirectResult> {
        self.search().map(|(result, _)| result)
    }

    /// Run the search and also hand back the final partition.
    pub fn search(&self) -> Result<(DirectResult, RectanglePartition)> {
        let minimize = self.options.globalmin.minimize;
        let eval = Evaluator::new(&*self.func, &self.mapper, minimize);
        let mut state = SearchState::new(self.dim(), self.options.record_history);
        let mut partition = RectanglePartition::new(self.options.size_key);

        let mut root = Rectangle::root(partition.alloc_id(), self.dim(), f64::INFINITY);
        root.value = eval.evaluate(&mut state, &root.center)?;
        partition.insert(root);

        let divider = RectangleDivider::new(eval, self.stop);

        let code = match self.stop.check(&state) {
            Some(code) => code,
            None => self.run_rounds(&divider, &mut partition, &mut state)?,
        };

        let fun = divider.evaluator().true_sign(state.best_value);
        info!(
            "{} after {} evaluations ({} rounds, {} divisions): f = {:.10e} at {:?}",
            code, state.nfev, state.nit, state.ndiv, fun, state.best_x
        );

        let history = state.take_history();
        let result = DirectResult::new(
            state.best_x,
            fun,
            state.nfev,
            state.nit,
            state.ndiv,
            code,
        )
        .with_history(history);
        Ok((result, partition))
    }

    fn run_rounds(
        &self,
        divider: &RectangleDivider<'_>,
        partition: &mut RectanglePartition,
        state: &mut SearchState,
    ) -> Result<DirectReturnCode> {
        // the round cap only applies while the optimum is unknown
        let capped = self.stop.target.is_none();

        loop {
            if capped && state.nit >= self.options.max_iter {
                return Ok(DirectReturnCode::MaxIterReached);
            }
            state.nit += 1;

            let selected = self.selector.select(partition, state.best_value);
            debug!(
                "round {}: {} selected of {} groups, best = {:.10e}, nfev = {}",
                state.nit,
                selected.len(),
                partition.num_groups(),
                state.best_value,
                state.nfev
            );
            if selected.is_empty() {
                return Ok(DirectReturnCode::NoCandidates);
            }

            for cand in &selected {
                let outcome = divider.divide(partition, state, cand)?;
                if let Some(code) = outcome.stop {
                    return Ok(code);
                }
            }
        }
    }
}
