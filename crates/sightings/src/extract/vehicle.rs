//! Structured field extraction and vehicle description assembly

use log::debug;

use super::clean::clean_content;
use super::patterns::{FIELD_PATTERNS, Field, VEHICLE_FALLBACKS, first_capture};
use super::vin::extract_vin;
use crate::models::{UNKNOWN_VEHICLE, VehicleInfo};

/// Raw values read from the notification's data table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VehicleFields {
    pub plate_id: Option<String>,
    pub state_id: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub color: Option<String>,
}

impl VehicleFields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::PlateId => &mut self.plate_id,
            Field::StateId => &mut self.state_id,
            Field::VehicleMake => &mut self.make,
            Field::VehicleModel => &mut self.model,
            Field::VehicleYear => &mut self.year,
            Field::VehicleColor => &mut self.color,
        }
    }
}

/// Extract each field independently using its ordered label variants
pub fn extract_fields(cleaned_content: &str) -> VehicleFields {
    let mut fields = VehicleFields::default();

    for table in FIELD_PATTERNS.iter() {
        match first_capture(&table.matchers, cleaned_content) {
            Some((matcher, value)) => {
                let value = value.trim();
                debug!("Found {}: {:?} using pattern {:?}", table.field.as_str(), value, matcher.name);
                *fields.slot(table.field) = Some(value.to_string());
            }
            None => debug!("Could not find {}", table.field.as_str()),
        }
    }

    fields
}

/// Compose the vehicle description
///
/// Uses `"{year} {make} {model}[ {color}]"` when year, make and model were
/// all found; otherwise falls back to positional patterns over the content.
pub fn describe_vehicle(fields: &VehicleFields, cleaned_content: &str) -> String {
    if let (Some(year), Some(make), Some(model)) = (&fields.year, &fields.make, &fields.model) {
        return match &fields.color {
            Some(color) => format!("{} {} {} {}", year, make, model, color),
            None => format!("{} {} {}", year, make, model),
        };
    }

    debug!("Missing year/make/model, trying fallback patterns: {:?}", fields);
    VEHICLE_FALLBACKS
        .iter()
        .find_map(|fallback| {
            let description = fallback.describe(cleaned_content)?;
            debug!("Fallback vehicle description {:?} via {:?}", description, fallback.name);
            Some(description)
        })
        .unwrap_or_else(|| UNKNOWN_VEHICLE.to_string())
}

/// Extract vehicle information from decoded content and the subject line
///
/// Pure and deterministic: the same inputs always yield the same output.
pub fn extract_vehicle_info(content: &str, subject: &str) -> VehicleInfo {
    let cleaned = clean_content(content);
    debug!("Cleaned content length: {}", cleaned.len());

    let vin = extract_vin(&cleaned, subject);
    let fields = extract_fields(&cleaned);
    let vehicle = describe_vehicle(&fields, &cleaned);

    VehicleInfo {
        vin,
        vehicle,
        plate: fields.plate_id.unwrap_or_default(),
        state: fields
            .state_id
            .map(|s| s.to_uppercase())
            .unwrap_or_default(),
    }
}
