//! Adapters between [`Objective`](crate::objective::Objective) and the
//! call shapes of external local optimizers.
//!
//! External optimizer libraries each expect their own calling convention.
//! This module provides one adapter per convention, all built on a shared
//! evaluation core that owns the iteration counter and the point mapping:
//!
//! | Adapter | Call shape | Optimizer family |
//! |---------|------------|------------------|
//! | [`ScalarAdapter`] | `point -> energy` | derivative-free methods (BOBYQA, NEWUOA, simplex) |
//! | [`GradientAdapter`] | `point -> gradient` | gradient methods with separate value/gradient callbacks (CG) |
//! | [`OffsetAdapter`] | `(n, 1-based params) -> energy` | legacy routines with offset arrays (PRAXIS-style) |
//!
//! # Point mapping
//!
//! An adapter built with [`with_bounds`](ScalarAdapter::with_bounds) asks the
//! objective whether it normalizes. If so, the optimizer sees the unit
//! hypercube and the adapter denormalizes every incoming point before
//! evaluation; otherwise points pass through untouched.
//!
//! # Ownership
//!
//! Adapters take `&mut self` for every evaluation. One adapter belongs to
//! one optimization run; create a fresh adapter per run.
//!
//! # Errors
//!
//! Objective errors are returned unchanged. The iteration counter still
//! advances for a failed call; best-point tracking is left untouched.

mod eval;
mod gradient;
mod offset;
mod scalar;
mod types;

pub use eval::{BestTracker, PointMapping};
pub use gradient::GradientAdapter;
pub use offset::{OffsetAdapter, ONE_BASED};
pub use scalar::ScalarAdapter;
pub use types::{GradientFunction, OffsetFunction, ScalarFunction};
