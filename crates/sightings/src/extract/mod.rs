//! Vehicle information extraction
//!
//! Everything in here is a pure function of its text inputs: no network,
//! no clock, no shared state. Pattern priority lives in [`patterns`] as
//! ordered tables so it can be reviewed and tested on its own.

mod classify;
mod clean;
pub mod patterns;
mod vehicle;
mod vin;

pub use classify::SubjectClassifier;
pub use clean::clean_content;
pub use vehicle::{VehicleFields, describe_vehicle, extract_fields, extract_vehicle_info};
pub use vin::{extract_vin, is_valid_vin};
