//! # direct-search: DIRECT global optimization over a box
//!
//! Deterministic, derivative-free minimization (or maximization) of a
//! black-box function over `[lower, upper]^D` with the DIRECT (DIviding
//! RECTangles) method of Jones, Perttunen & Stuckman.
//!
//! ## Overview
//!
//! The search works in the unit hypercube. Every rectangle is evaluated once
//! at its center. Each round selects the potentially optimal rectangles (lower
//! convex hull of best value against size, filtered by a balance test) and
//! trisects them along their longest sides.
//!
//! | Module      | Role                                              |
//! |-------------|---------------------------------------------------|
//! | [`mapper`]  | unit cube to caller's box and back                |
//! | [`rect`]    | rectangles and size keys                          |
//! | [`storage`] | rectangles grouped by size                        |
//! | [`select`]  | potentially optimal test                          |
//! | [`divide`]  | trisection, evaluation, termination rule          |
//! | [`direct`]  | the round loop                                    |
//! | [`builder`] | fluent configuration                              |
//! | [`hilbert`] | Hilbert-curve indexing of the unit cube (utility) |
//!
//! ## Example
//!
//! ```no_run
//! use direct_search::{direct_optimize, DirectOptions, GlobalMin};
//!
//! let result = direct_optimize(
//!     |x: &[f64]| x.iter().map(|xi| xi * xi).sum(),
//!     &vec![(-2.0, 3.0), (-2.0, 3.0)],
//!     DirectOptions {
//!         globalmin: GlobalMin::known(0.0),
//!         tol: 1e-4,
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//! assert!(result.fun < 1e-4);
//! ```
//!
//! ## Reference
//!
//! - Jones, D.R., Perttunen, C.D. & Stuckman, B.E. "Lipschitzian optimization
//!   without the Lipschitz constant." J Optim Theory Appl 79, 157–181 (1993).

pub mod builder;
pub mod direct;
pub mod divide;
pub mod error;
pub mod hilbert;
pub mod mapper;
pub mod rect;
pub mod select;
pub mod storage;
pub mod types;

// Re-export main types
pub use builder::{direct_optimize, DirectBuilder};
pub use direct::Direct;
pub use divide::{DivisionOutcome, RectangleDivider, SearchState, StopRule};
pub use error::{DirectError, DirectReturnCode, Result};
pub use hilbert::HilbertIndexer;
pub use mapper::UnitMapper;
pub use rect::{RectId, Rectangle, SizeKey};
pub use select::{Candidate, OptimalSelector};
pub use storage::RectanglePartition;
pub use types::{
    bounds_from_rows, Bounds, DirectOptions, DirectResult, EvalRecord, GlobalMin, ObjectiveFn,
    SizeKeyMode,
};
