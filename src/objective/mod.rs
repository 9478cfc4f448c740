//! The objective contract consumed by every adapter.
//!
//! Concrete problems (force fields, parameter fits, benchmark functions)
//! implement [`Objective`] and, if they can supply analytic derivatives,
//! [`DifferentiableObjective`]. The adapters in [`crate::adapter`] turn
//! these into the call shapes expected by external local optimizers.
//!
//! # Combinators
//!
//! - [`RangedObjective`]: optimizes only selected index ranges of a larger
//!   parameter vector, holding the remaining parameters fixed.
//! - [`NumericalGradient`]: supplies a finite-difference gradient for
//!   objectives that only provide fitness values.

mod numerical;
mod ranged;
mod types;

pub use numerical::{NumericalGradient, Stencil};
pub use ranged::{ParamRange, RangeError, RangedObjective};
pub use types::{DifferentiableObjective, Objective};
