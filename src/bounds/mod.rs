//! Box bounds and unit-hypercube normalization.
//!
//! Bound-constrained local optimizers such as trust-region methods work
//! best when every variable lives on the same scale. [`Bounds`] maps points
//! between their physical intervals and `[0, 1]^n`:
//!
//! - normalize: `u[i] = (x[i] - lower[i]) / (upper[i] - lower[i])`
//! - denormalize: `x[i] = u[i] * (upper[i] - lower[i]) + lower[i]`
//!
//! The two mappings are exact inverses up to floating-point precision.
//! All operations are pure; a `Bounds` value can be shared freely across
//! threads.
//!
//! # Examples
//!
//! ```
//! use u_locopt::bounds::Bounds;
//!
//! let bounds = Bounds::new(vec![0.0, 0.0], vec![10.0, 10.0]).unwrap();
//! let unit = bounds.normalize(&[5.0, 2.0]);
//! assert_eq!(unit, vec![0.5, 0.2]);
//! assert_eq!(bounds.denormalize(&unit), vec![5.0, 2.0]);
//! ```

mod normalize;
mod types;

pub use types::{Bounds, BoundsError};
