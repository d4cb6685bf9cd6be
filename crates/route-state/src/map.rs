//! Map markers driven by the speed chart

use leptos::prelude::*;
use route_charts::{MapCollaborator, MapPoint};

/// Oldest pins are dropped past this count
pub const MAX_PINNED_MARKERS: usize = 20;

#[derive(Clone, Default)]
pub struct MapState {
    /// Hover marker following the speed chart crosshair
    pub selected_point: ArcRwSignal<Option<MapPoint>>,
    pub pinned_markers: ArcRwSignal<Vec<MapPoint>>,
}

impl MapState {
    pub fn clear_selection(&self) {
        self.selected_point.set(None);
    }

    pub fn clear_pins(&self) {
        self.pinned_markers.set(Vec::new());
    }

    pub fn pinned_count(&self) -> usize {
        self.pinned_markers.with_untracked(Vec::len)
    }
}

impl MapCollaborator for MapState {
    fn set_selected_chart_point(&self, point: MapPoint) {
        self.selected_point.set(Some(point));
    }

    fn add_pinned_marker(&self, point: MapPoint) {
        tracing::debug!(lat = point.lat, lng = point.lng, status = %point.status, "marker pinned");
        self.pinned_markers.update(|pins| {
            pins.push(point);
            if pins.len() > MAX_PINNED_MARKERS {
                pins.remove(0);
            }
        });
    }
}
