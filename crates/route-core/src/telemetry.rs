//! Telemetry samples plotted on route charts

use crate::{colors, Coordinate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// DEVICE STATUS
// ============================================================================

/// Movement state reported with each speed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Driving,
    Idling,
    Stopped,
    Offline,
}

impl DeviceStatus {
    pub fn all() -> &'static [Self] {
        &[Self::Driving, Self::Idling, Self::Stopped, Self::Offline]
    }

    /// Status code as sent over the wire and shown in legends
    pub fn code(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::Idling => "idling",
            Self::Stopped => "stopped",
            Self::Offline => "offline",
        }
    }

    /// Fixed legend color per status
    pub fn color(&self) -> &'static str {
        match self {
            Self::Driving => colors::DRIVING,
            Self::Idling => colors::IDLING,
            Self::Stopped => colors::STOPPED,
            Self::Offline => colors::OFFLINE,
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for DeviceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.code() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Legend entry for the custom speed legend (one per status)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLegendItem {
    pub label: String,
    pub color: String,
}

pub fn custom_speed_legend() -> Vec<StatusLegendItem> {
    DeviceStatus::all()
        .iter()
        .map(|status| StatusLegendItem {
            label: status.code().to_string(),
            color: status.color().to_string(),
        })
        .collect()
}

// ============================================================================
// POINTS
// ============================================================================

/// Which kind of series a chart or legend line shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Speed,
    Temperature,
}

/// Speed sample (x = epoch milliseconds, y = plotted speed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedPoint {
    pub x: i64,
    pub y: f64,
    pub speed: f64,
    pub status: DeviceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl SpeedPoint {
    pub fn new(x: i64, speed: f64, status: DeviceStatus) -> Self {
        Self {
            x,
            y: speed,
            speed,
            status,
            coordinate: None,
        }
    }

    /// Builder: attach position
    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.coordinate = Some(Coordinate::new(lat, lng));
        self
    }

    /// Position usable for map publication
    pub fn located(&self) -> Option<Coordinate> {
        self.coordinate.filter(Coordinate::is_located)
    }
}

/// Temperature sample from one sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub x: i64,
    pub y: f64,
    pub label: String,
}

impl TemperaturePoint {
    pub fn new(x: i64, y: f64, label: impl Into<String>) -> Self {
        Self {
            x,
            y,
            label: label.into(),
        }
    }
}

/// Point of any chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartPoint {
    Speed(SpeedPoint),
    Temperature(TemperaturePoint),
}

impl ChartPoint {
    pub fn x(&self) -> i64 {
        match self {
            Self::Speed(p) => p.x,
            Self::Temperature(p) => p.x,
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            Self::Speed(p) => p.y,
            Self::Temperature(p) => p.y,
        }
    }

    pub fn graph_type(&self) -> GraphType {
        match self {
            Self::Speed(_) => GraphType::Speed,
            Self::Temperature(_) => GraphType::Temperature,
        }
    }
}

impl From<SpeedPoint> for ChartPoint {
    fn from(point: SpeedPoint) -> Self {
        Self::Speed(point)
    }
}

impl From<TemperaturePoint> for ChartPoint {
    fn from(point: TemperaturePoint) -> Self {
        Self::Temperature(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_message() {
        let err = "parked".parse::<DeviceStatus>().unwrap_err();
        assert_eq!(err, UnknownStatus("parked".into()));
        assert_eq!(err.to_string(), "unknown device status `parked`");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("idling".parse::<DeviceStatus>(), Ok(DeviceStatus::Idling));
        assert!("flying".parse::<DeviceStatus>().is_err());
    }

    #[test]
    fn test_custom_speed_legend_covers_all_statuses() {
        let legend = custom_speed_legend();
        assert_eq!(legend.len(), DeviceStatus::all().len());
        assert_eq!(legend[0].color, colors::DRIVING);
    }

    #[test]
    fn test_point_tagging() {
        let json = r#"{"kind":"speed","x":100,"y":42.0,"speed":42.0,"status":"driving","coordinate":{"lat":52.2,"lng":21.0}}"#;
        let point: ChartPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.graph_type(), GraphType::Speed);
        assert_eq!(point.x(), 100);

        let temp: ChartPoint = TemperaturePoint::new(5, -3.5, "Sensor 1").into();
        let value = serde_json::to_value(&temp).unwrap();
        assert_eq!(value["kind"], "temperature");
    }

    #[test]
    fn test_unlocated_speed_point() {
        let point = SpeedPoint::new(0, 10.0, DeviceStatus::Driving).at(0.0, 0.0);
        assert_eq!(point.located(), None);
    }
}
