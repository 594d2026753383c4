//! Ordered pattern tables for VIN and vehicle field extraction
//!
//! Each table is tried top to bottom and the first matcher that captures
//! wins. Labels are case-insensitive; captured values use explicit ASCII
//! classes so case folding never widens what a value may contain.

use regex::Regex;
use std::sync::LazyLock;

/// VIN alphabet: digits and letters except I, O and Q, either case
const VIN_CHARS: &str = "[A-HJ-NPR-Za-hj-npr-z0-9]{17}";

/// Labels that may follow a model name and must not be captured into it
const MODEL_TERMINATOR: &str = r"(?:\s+(?i:Vehicle|Price|DRN|State|Plate)|$)";

/// A named regex whose first capture group is the extracted value
#[derive(Debug)]
pub struct Matcher {
    pub name: &'static str,
    regex: Regex,
}

impl Matcher {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    /// First capture group of the leftmost match
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// The underlying pattern source
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Try matchers in order; return the first that captures and its value
pub fn first_capture<'a, 't>(
    matchers: &'a [Matcher],
    text: &'t str,
) -> Option<(&'a Matcher, &'t str)> {
    matchers
        .iter()
        .find_map(|m| m.capture(text).map(|value| (m, value)))
}

/// Structured fields read from the notification's data table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PlateId,
    StateId,
    VehicleMake,
    VehicleModel,
    VehicleYear,
    VehicleColor,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlateId => "plateId",
            Self::StateId => "stateId",
            Self::VehicleMake => "vehicleMake",
            Self::VehicleModel => "vehicleModel",
            Self::VehicleYear => "vehicleYear",
            Self::VehicleColor => "vehicleColor",
        }
    }
}

/// Label variants for one field, most specific first
#[derive(Debug)]
pub struct FieldPatterns {
    pub field: Field,
    pub matchers: Vec<Matcher>,
}

/// VIN following `VIN:` in the subject line
pub static SUBJECT_VIN: LazyLock<Matcher> =
    LazyLock::new(|| Matcher::new("subject VIN:", &format!(r"(?i:VIN):\s*({VIN_CHARS})")));

/// Labeled VINs in the body, strictest first
pub static CONTENT_VIN: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    vec![
        Matcher::new("VIN <space>", &format!(r"(?i:VIN)\s+({VIN_CHARS})")),
        Matcher::new("VIN:", &format!(r"(?i:VIN):\s*({VIN_CHARS})")),
        Matcher::new("VIN <space>:", &format!(r"(?i:VIN)\s*:\s*({VIN_CHARS})")),
        Matcher::new("VIN<adjacent>", &format!(r"(?i:VIN)\s*({VIN_CHARS})")),
    ]
});

/// Any uppercase 17-character VIN-alphabet run
pub static BARE_VIN: LazyLock<Matcher> =
    LazyLock::new(|| Matcher::new("bare VIN", r"([A-HJ-NPR-Z0-9]{17})"));

fn labeled(field: Field, labels: &[(&'static str, &str)], value: &str) -> FieldPatterns {
    FieldPatterns {
        field,
        matchers: labels
            .iter()
            .map(|&(name, label)| Matcher::new(name, &format!(r"(?i:{label})\s+{value}")))
            .collect(),
    }
}

/// Per-field label variants, in extraction order
pub static FIELD_PATTERNS: LazyLock<Vec<FieldPatterns>> = LazyLock::new(|| {
    let model = format!(r"([A-Za-z0-9\s]+?){MODEL_TERMINATOR}");

    vec![
        labeled(
            Field::PlateId,
            &[
                ("Plate ID", r"Plate\s+ID"),
                ("PlateID", "PlateID"),
                ("Plate", "Plate"),
            ],
            "([A-Za-z0-9]{3,8})",
        ),
        labeled(
            Field::StateId,
            &[
                ("State ID", r"State\s+ID"),
                ("StateID", "StateID"),
                ("State", "State"),
            ],
            "([A-Za-z]{2})",
        ),
        labeled(
            Field::VehicleMake,
            &[
                ("Vehicle Make", r"Vehicle\s+Make"),
                ("VehicleMake", "VehicleMake"),
                ("Make", "Make"),
            ],
            "([A-Za-z]+)",
        ),
        labeled(
            Field::VehicleModel,
            &[
                ("Vehicle Model", r"Vehicle\s+Model"),
                ("VehicleModel", "VehicleModel"),
                ("Model", "Model"),
            ],
            &model,
        ),
        labeled(
            Field::VehicleYear,
            &[
                ("Vehicle Year", r"Vehicle\s+Year"),
                ("VehicleYear", "VehicleYear"),
                ("Year", "Year"),
            ],
            "([0-9]{4})",
        ),
        labeled(
            Field::VehicleColor,
            &[
                ("Vehicle Color", r"Vehicle\s+Color"),
                ("VehicleColor", "VehicleColor"),
                ("Color", "Color"),
            ],
            "([A-Za-z]+)",
        ),
    ]
});

/// Positional description: a 4-digit year followed by word tokens
#[derive(Debug)]
pub struct VehicleFallback {
    pub name: &'static str,
    regex: Regex,
}

impl VehicleFallback {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    /// All captured tokens of the leftmost match, space-joined
    pub fn describe(&self, text: &str) -> Option<String> {
        let caps = self.regex.captures(text)?;
        let tokens: Vec<&str> = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect();
        Some(tokens.join(" "))
    }
}

/// Fallback descriptions, longest first
pub static VEHICLE_FALLBACKS: LazyLock<Vec<VehicleFallback>> = LazyLock::new(|| {
    vec![
        VehicleFallback::new(
            "year make model color",
            r"([0-9]{4})\s+([A-Za-z]+)\s+([A-Za-z0-9]+)\s+([A-Za-z]+)",
        ),
        VehicleFallback::new(
            "year make model",
            r"([0-9]{4})\s+([A-Za-z]+)\s+([A-Za-z0-9]+)",
        ),
    ]
});
