//! Fluent construction of a search, plus a one-call entry point.
//!
//! ```no_run
//! use direct_search::DirectBuilder;
//!
//! let result = DirectBuilder::new(|x: &[f64]| x.iter().map(|v| v * v).sum(), vec![(-2.0, 2.0); 2])
//!     .max_feval(500)
//!     .max_iter(50)
//!     .optimize()
//!     .unwrap();
//! println!("{}", result);
//! ```

use crate::direct::Direct;
use crate::error::Result;
use crate::types::{Bounds, DirectOptions, DirectResult, GlobalMin, SizeKeyMode};

/// Builder for a [`Direct`] search.
pub struct DirectBuilder<F> {
    func: F,
    bounds: Bounds,
    options: DirectOptions,
}

impl<F> DirectBuilder<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
{
    pub fn new(func: F, bounds: Bounds) -> Self {
        Self {
            func,
            bounds,
            options: DirectOptions::default(),
        }
    }

    /// Replace every option at once.
    pub fn options(mut self, options: DirectOptions) -> Self {
        self.options = options;
        self
    }

    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.options.epsilon = epsilon;
        self
    }

    pub fn max_feval(mut self, max_feval: usize) -> Self {
        self.options.max_feval = max_feval;
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.options.max_iter = max_iter;
        self
    }

    pub fn max_rectdiv(mut self, max_rectdiv: usize) -> Self {
        self.options.max_rectdiv = max_rectdiv;
        self
    }

    pub fn globalmin(mut self, globalmin: GlobalMin) -> Self {
        self.options.globalmin = globalmin;
        self
    }

    /// Supply the known optimum, in the caller's sign convention.
    pub fn known_optimum(mut self, value: f64) -> Self {
        self.options.globalmin.known = true;
        self.options.globalmin.value = Some(value);
        self
    }

    /// Maximize instead of minimize.
    pub fn maximize(mut self) -> Self {
        self.options.globalmin.minimize = false;
        self
    }

    pub fn tol(mut self, tol: f64) -> Self {
        self.options.tol = tol;
        self
    }

    pub fn record_history(mut self, record: bool) -> Self {
        self.options.record_history = record;
        self
    }

    pub fn size_key(mut self, mode: SizeKeyMode) -> Self {
        self.options.size_key = mode;
        self
    }

    /// Validate and produce the optimizer without running it.
    pub fn build(self) -> Result<Direct> {
        Direct::new(self.func, &self.bounds, self.options)
    }

    /// Validate and run.
    pub fn optimize(self) -> Result<DirectResult> {
        self.build()?.optimize()
    }
}

/// Run a search in one call.
pub fn direct_optimize(
    func: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    bounds: &Bounds,
    options: DirectOptions,
) -> Result<DirectResult> {
    Direct::new(func, bounds, options)?.optimize()
}
