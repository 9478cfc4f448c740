//! Toggleable activity counters.
//!
//! Counts trials, local optimizations, objective and gradient evaluations,
//! sanity discards, and arbitrary string-keyed events. Counting is off by
//! default and costs one branch per increment; once enabled it stays on.
//!
//! Counters are individually atomic and use relaxed ordering. Totals read
//! while other threads are still incrementing are approximate.
//!
//! # Process-wide statistics
//!
//! ```
//! use u_locopt::stats;
//!
//! stats::enable_detailed_statistics();
//! stats::global().increment_custom("restarts");
//! for line in stats::global().report() {
//!     println!("{line}");
//! }
//! ```

mod backend;
mod facade;
mod report;

pub use backend::{Counter, CountingStatistics, CustomCounterMode, NoopStatistics, StatisticsBackend};
pub use facade::{enable_detailed_statistics, global, Statistics};
