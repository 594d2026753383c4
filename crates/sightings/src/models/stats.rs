//! Summary counts over a set of email records

use serde::{Deserialize, Serialize};

/// Dashboard counters, recomputed on demand from records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Records still in `NEW` status
    pub new_count: usize,
    pub total_count: usize,
    /// Records received on the current local calendar day
    pub today_count: usize,
}
