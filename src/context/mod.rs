//! Process-scoped optimization context.
//!
//! An [`OptContext`] owns one [`RandomSource`](crate::random::RandomSource)
//! and one [`Statistics`](crate::stats::Statistics), built from a
//! [`ContextConfig`]. Passing the context by reference keeps runs
//! reproducible and testable without touching the process-wide instances;
//! [`OptContext::install_global`] configures those for code that uses
//! [`random::global`](crate::random::global) and
//! [`stats::global`](crate::stats::global) directly.

mod config;
mod runtime;

pub use config::{ContextConfig, RandomConfig, StatsConfig};
pub use runtime::{ConfigError, OptContext};
