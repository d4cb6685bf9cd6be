//! # route-core
//!
//! Core domain types for vehicle route telemetry charts.
//! Implements Strategy pattern for unit label translation.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod user;

pub use config::*;
pub use error::*;
pub use telemetry::*;
pub use user::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Unit Label Translation
// ============================================================================

/// Translation keys used by chart axis labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationKey {
    KilometersPerHour,
    Celsius,
}

impl TranslationKey {
    /// Dotted key as stored in translation bundles
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KilometersPerHour => "ABBREVIATIONS.KM_H",
            Self::Celsius => "ABBREVIATIONS.CELSIUS",
        }
    }
}

/// Strategy trait for turning a raw tick value into a localized unit string
pub trait Translator {
    fn translate(&self, key: TranslationKey, value: &str) -> String;
}

/// Built-in English unit labels
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishUnits;

impl Translator for EnglishUnits {
    fn translate(&self, key: TranslationKey, value: &str) -> String {
        match key {
            TranslationKey::KilometersPerHour => format!("{} km/h", value),
            TranslationKey::Celsius => format!("{} °C", value),
        }
    }
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Geographic position of a telemetry sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// A zero latitude is what trackers report before a GPS fix.
    pub fn is_located(&self) -> bool {
        self.lat != 0.0 && self.lat.is_finite() && self.lng.is_finite()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

// ============================================================================
// DATE FORMATS
// ============================================================================

/// chrono format strings shared by axes and tooltips
pub mod date_formats {
    pub const DATE: &str = "%d.%m.%Y";
    pub const FULL_TIME: &str = "%H:%M";
    pub const SECOND: &str = "%H:%M:%S";
    pub const DATE_TIME_FULL: &str = "%d.%m.%Y %H:%M:%S";
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const DRIVING: &str = "#22c55e";
    pub const IDLING: &str = "#fbbf24";
    pub const STOPPED: &str = "#ef4444";
    pub const OFFLINE: &str = "#888888";
    pub const ACCENT: &str = "#743bee";
    pub const MARKER_LINE: &str = "rgba(116,59,238,0.65)";
    pub const TEMPERATURE: &str = "#3b82f6";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_units() {
        assert_eq!(EnglishUnits.translate(TranslationKey::KilometersPerHour, "40"), "40 km/h");
        assert_eq!(EnglishUnits.translate(TranslationKey::Celsius, "-5"), "-5 °C");
    }

    #[test]
    fn test_coordinate_location() {
        assert!(Coordinate::new(52.1, 21.0).is_located());
        assert!(!Coordinate::new(0.0, 21.0).is_located());
        assert!(!Coordinate::new(f64::NAN, 21.0).is_located());
    }
}
