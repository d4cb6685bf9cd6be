//! Seams to the rest of the UI: map, tooltip panel, session and theme

use crate::legend::LegendLine;
use chrono::{FixedOffset, Offset, Utc};
use route_core::{Coordinate, DeviceStatus, Translator};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Speed sample projected onto the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub speed: f64,
    pub status: DeviceStatus,
    pub lat: f64,
    pub lng: f64,
}

impl MapPoint {
    pub fn new(speed: f64, status: DeviceStatus, coordinate: Coordinate) -> Self {
        Self {
            speed,
            status,
            lat: coordinate.lat,
            lng: coordinate.lng,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }
}

pub trait MapCollaborator {
    /// Moves the hover marker
    fn set_selected_chart_point(&self, point: MapPoint);
    /// Drops a persistent marker
    fn add_pinned_marker(&self, point: MapPoint);
}

pub trait TooltipCollaborator {
    fn set_speed_legend_lines(&self, lines: Vec<LegendLine>);
    fn set_temp_legend_lines(&self, lines: Vec<LegendLine>);
    fn set_title(&self, title: Option<String>);
}

pub trait AuthCollaborator {
    /// Date part preferred by the signed-in user
    fn date_format(&self) -> Option<String>;

    fn utc_offset(&self) -> FixedOffset {
        Utc.fix()
    }
}

pub trait ThemeCollaborator {
    /// Point-in-time read of the current accent color
    fn accent_color(&self) -> String;
}

/// Everything the chart service talks to
#[derive(Clone)]
pub struct Collaborators {
    pub map: Rc<dyn MapCollaborator>,
    pub tooltip: Rc<dyn TooltipCollaborator>,
    pub auth: Rc<dyn AuthCollaborator>,
    pub theme: Rc<dyn ThemeCollaborator>,
    pub translator: Rc<dyn Translator>,
}
