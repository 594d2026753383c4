//! Domain models for vehicle-sighting notifications

mod message;
mod stats;
mod vehicle;

pub use message::{EmailRecord, EmailStatus, MessageId, VIN_NOT_FOUND};
pub use stats::Stats;
pub use vehicle::{UNKNOWN_VEHICLE, VehicleInfo};
