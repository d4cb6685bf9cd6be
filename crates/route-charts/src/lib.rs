//! # route-charts
//!
//! Configuration and interaction layer for vehicle route telemetry charts.
//! Builds the declarative option tree handed to the line-chart engine and
//! reacts to crosshair, click, zoom and pan events.
//!
//! ## Modules
//!
//! - `chartkit` - Time range, pixel/time scale, zoom range limiter
//! - `options` - Declarative chart configuration tree
//! - `engine` - Live chart instances and the registry that tracks them
//! - `legend` - Legend lines and point lookup under the crosshair
//! - `collaborators` - Map, tooltip, auth and theme seams
//! - `service` - `VehicleRoutesChartService`

pub mod chartkit;
pub mod collaborators;
pub mod engine;
pub mod error;
pub mod legend;
pub mod options;
pub mod service;

#[cfg(test)]
mod testing;

pub use chartkit::*;
pub use collaborators::*;
pub use engine::*;
pub use error::*;
pub use legend::*;
pub use options::*;
pub use service::*;

use serde::{Deserialize, Serialize};

/// 12 minutes: the narrowest x window zoom may produce
pub const MIN_CHART_RANGE_MS: i64 = 720_000;

/// Sync group shared by the speed and temperature charts of a route
pub const ROUTE_SYNC_GROUP: u32 = 2;

/// Tunables of the route chart service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartSettings {
    pub min_chart_range_ms: i64,
    pub sync_group: u32,
    pub marker_line_color: String,
    pub marker_line_width: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            min_chart_range_ms: MIN_CHART_RANGE_MS,
            sync_group: ROUTE_SYNC_GROUP,
            marker_line_color: route_core::colors::MARKER_LINE.to_string(),
            marker_line_width: 2.0,
        }
    }
}

/// Horizontal padding between the canvas edge and the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub left: f64,
    pub right: f64,
}

impl ChartMargin {
    /// Standard chart margins
    pub const fn standard() -> Self {
        Self {
            left: 60.0,
            right: 60.0,
        }
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Canvas width of a chart instance; only the x axis is interactive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDimensions {
    pub width: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            margin: ChartMargin::default(),
        }
    }

    /// Left edge of the plot area
    pub fn plot_left(&self) -> f64 {
        self.margin.left
    }

    /// Right edge of the plot area
    pub fn plot_right(&self) -> f64 {
        (self.width - self.margin.right).max(self.margin.left)
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_partial_json() {
        let settings: ChartSettings = serde_json::from_str(r#"{"syncGroup":7}"#).unwrap();
        assert_eq!(settings.sync_group, 7);
        assert_eq!(settings.min_chart_range_ms, MIN_CHART_RANGE_MS);
    }

    #[test]
    fn test_plot_edges() {
        let dims = ChartDimensions::new(800.0);
        assert_eq!(dims.plot_left(), 60.0);
        assert_eq!(dims.plot_right(), 740.0);

        let narrow = ChartDimensions::new(100.0);
        assert_eq!(narrow.plot_right(), narrow.plot_left());
    }
}
