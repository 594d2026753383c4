//! Mailbox search
//!
//! Plans a fixed ladder of Gmail queries from broad to narrow and merges
//! their results into one deduplicated candidate list.

mod executor;
mod plan;

pub use executor::{SearchOutcome, collect_candidates};
pub use plan::{QueryKind, SearchQuery, plan_queries};
