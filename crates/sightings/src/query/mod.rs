//! Query API for consumers of scan results

mod stats;

pub use stats::{compute_stats, compute_stats_on};
