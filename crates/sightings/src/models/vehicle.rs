//! Vehicle information extracted from a notification

use serde::{Deserialize, Serialize};

/// Placeholder description when no vehicle could be identified
pub const UNKNOWN_VEHICLE: &str = "Unknown";

/// Structured vehicle fields for one notification
///
/// Absent plate or state is an empty string, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    /// 17-character VIN (uppercase, no I/O/Q)
    pub vin: Option<String>,
    /// e.g. `2007 Chevrolet Tahoe Gray`, or [`UNKNOWN_VEHICLE`]
    pub vehicle: String,
    pub plate: String,
    /// Two-letter uppercase state code
    pub state: String,
}

impl Default for VehicleInfo {
    fn default() -> Self {
        Self {
            vin: None,
            vehicle: UNKNOWN_VEHICLE.to_string(),
            plate: String::new(),
            state: String::new(),
        }
    }
}
