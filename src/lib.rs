//! Bound-constrained local optimization bridge.
//!
//! Connects one objective abstraction to many external local optimizers:
//!
//! - **Bounds**: per-dimension box bounds and the affine map onto the unit
//!   hypercube shared by all normalizing adapters.
//! - **Objective**: the `fitness` / `gradient` contract, plus combinators
//!   for partial parameter ranges and finite-difference gradients.
//! - **Adapters**: scalar, gradient-only and offset-indexed call shapes with
//!   iteration counting and best-point tracking.
//! - **Random**: an installable, seedable random source with a process-wide
//!   instance, for reproducible stochastic decisions.
//! - **Stats**: toggleable, thread-safe activity counters with a text
//!   report.
//! - **Context**: a process-scoped handle bundling a random source and
//!   statistics, built from configuration.
//!
//! # Architecture
//!
//! The crate contains no optimizer of its own and no problem domain. The
//! global-search loop that calls into it and the local optimizers it feeds
//! are both supplied by consumers. Logging goes through `tracing`; no
//! subscriber is installed here.

pub mod adapter;
pub mod bounds;
pub mod context;
pub mod objective;
pub mod random;
pub mod stats;
