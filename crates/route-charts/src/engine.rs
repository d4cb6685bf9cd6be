//! Live chart instances and the registry that tracks them
//!
//! Models the engine-side state the route service reads and writes:
//! current x scale, crosshair position, dataset visibility and the set of
//! live instances used for range synchronization.

use crate::chartkit::{RangeLimits, TimeRange, TimeScale};
use crate::error::{ChartError, ChartResult};
use crate::options::{ChartOptions, EventKind};
use crate::ChartDimensions;
use route_core::ChartPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// DATASETS
// ============================================================================

/// One named series rendered as one line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    /// Drawn on the chart but never listed in legends
    #[serde(default)]
    pub invisible_info: bool,
    /// Ordered by `x`
    pub data: Vec<ChartPoint>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<ChartPoint>) -> Self {
        Self {
            label: label.into(),
            border_color: None,
            background_color: None,
            hidden: false,
            invisible_info: false,
            data,
        }
    }

    /// Builder: line color
    pub fn with_border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = Some(color.into());
        self
    }

    /// Builder: fill color
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn invisible_info(mut self) -> Self {
        self.invisible_info = true;
        self
    }

    /// Line color, falling back to the fill color
    pub fn color(&self) -> Option<&str> {
        self.border_color
            .as_deref()
            .or(self.background_color.as_deref())
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Input forwarded from the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    /// Pointer activity at a canvas x position
    Pointer { kind: EventKind, px: f64 },
    ZoomStart,
    /// Wheel or drag zoom to a requested window
    Zoom { range: TimeRange },
    /// Shift-drag pan by a time delta
    Pan { delta_ms: i64 },
}

/// Propagation state of a dispatched event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionEvent {
    propagation_stopped: bool,
}

impl InteractionEvent {
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

// ============================================================================
// CHART
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartId(pub u32);

impl std::fmt::Display for ChartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Vertical crosshair line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerLine {
    pub value_x: Option<i64>,
}

/// A rendered chart instance
#[derive(Debug, Clone)]
pub struct Chart {
    id: ChartId,
    pub options: ChartOptions,
    pub datasets: Vec<Dataset>,
    pub dimensions: ChartDimensions,
    marker_line: MarkerLine,
    x_scale: TimeRange,
    visibility: HashMap<usize, bool>,
    revision: u64,
}

impl Chart {
    pub fn new(id: ChartId, options: ChartOptions, datasets: Vec<Dataset>) -> Self {
        let x_scale = TimeRange::new(options.scales.x.min, options.scales.x.max);
        Self {
            id,
            options,
            datasets,
            dimensions: ChartDimensions::default(),
            marker_line: MarkerLine::default(),
            x_scale,
            visibility: HashMap::new(),
            revision: 0,
        }
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    /// Currently displayed x window
    pub fn x_scale(&self) -> TimeRange {
        self.x_scale
    }

    /// Times the chart re-read its options
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn marker_line(&self) -> MarkerLine {
        self.marker_line
    }

    pub fn set_marker(&mut self, value_x: Option<i64>) {
        self.marker_line.value_x = value_x;
    }

    /// Timestamp under a canvas x position
    pub fn time_at_pixel(&self, px: f64) -> i64 {
        TimeScale::new()
            .domain(self.x_scale.min, self.x_scale.max)
            .range(self.dimensions.plot_left(), self.dimensions.plot_right())
            .invert(px)
    }

    /// Sync group when crosshair sync is enabled
    pub fn sync_group(&self) -> Option<u32> {
        let sync = self.options.plugins.marker_line.sync;
        sync.enabled.then_some(sync.group)
    }

    pub fn is_dataset_visible(&self, index: usize) -> bool {
        match self.visibility.get(&index) {
            Some(visible) => *visible,
            None => self.datasets.get(index).is_some_and(|d| !d.hidden),
        }
    }

    /// Legend toggle; overrides the dataset's own `hidden` flag
    pub fn set_dataset_visibility(&mut self, index: usize, visible: bool) {
        self.visibility.insert(index, visible);
    }

    pub fn limits(&self) -> RangeLimits {
        self.options.plugins.zoom.limits.x
    }

    /// Re-read x bounds from the options and redraw
    pub fn update(&mut self) {
        let x = &self.options.scales.x;
        self.x_scale = TimeRange::new(x.min, x.max);
        self.revision += 1;
    }

    /// Zoom to `requested`, clamped by the zoom limits
    pub fn zoom(&mut self, requested: TimeRange) -> TimeRange {
        let range = self.limits().clamp(requested);
        self.apply_range(range);
        range
    }

    /// Pan by `delta_ms`, stopping at the bounds
    pub fn pan(&mut self, delta_ms: i64) -> TimeRange {
        let range = self.limits().pan(self.x_scale, delta_ms);
        self.apply_range(range);
        range
    }

    fn apply_range(&mut self, range: TimeRange) {
        self.options.scales.x.min = range.min;
        self.options.scales.x.max = range.max;
        self.update();
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// All live chart instances
#[derive(Debug, Default)]
pub struct ChartRegistry {
    charts: Vec<Chart>,
    next_id: u32,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, options: ChartOptions, datasets: Vec<Dataset>) -> ChartId {
        let id = ChartId(self.next_id);
        self.next_id += 1;
        self.charts.push(Chart::new(id, options, datasets));
        tracing::debug!(chart = %id, "chart registered");
        id
    }

    /// Destroy an instance
    pub fn unregister(&mut self, id: ChartId) -> Option<Chart> {
        let index = self.charts.iter().position(|c| c.id == id)?;
        tracing::debug!(chart = %id, "chart destroyed");
        Some(self.charts.remove(index))
    }

    pub fn get(&self, id: ChartId) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: ChartId) -> Option<&mut Chart> {
        self.charts.iter_mut().find(|c| c.id == id)
    }

    pub fn chart(&self, id: ChartId) -> ChartResult<&Chart> {
        self.get(id).ok_or(ChartError::UnknownChart(id))
    }

    pub fn chart_mut(&mut self, id: ChartId) -> ChartResult<&mut Chart> {
        self.get_mut(id).ok_or(ChartError::UnknownChart(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chart> {
        self.charts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Chart> {
        self.charts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Other charts in the same sync group, in registration order
    pub fn siblings(&self, id: ChartId) -> Vec<ChartId> {
        let Some(group) = self.get(id).and_then(Chart::sync_group) else {
            return Vec::new();
        };
        self.charts
            .iter()
            .filter(|c| c.id != id && c.sync_group() == Some(group))
            .map(|c| c.id)
            .collect()
    }

    /// Move the crosshair of `id` and its group; returns every chart touched
    pub fn move_marker(&mut self, id: ChartId, value_x: Option<i64>) -> ChartResult<Vec<ChartId>> {
        self.chart(id)?;
        let mut touched = vec![id];
        touched.extend(self.siblings(id));
        for chart in self.charts.iter_mut().filter(|c| touched.contains(&c.id)) {
            chart.set_marker(value_x);
        }
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn test_register_and_destroy() {
        let fx = Fixture::new();
        let a = fx.register(fx.speed_options(false), vec![speed_dataset()]);
        let b = fx.register(fx.temp_options(), vec![]);
        assert_ne!(a, b);

        let mut registry = fx.registry.borrow_mut();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.unregister(a).map(|c| c.id()), Some(a));
        assert!(registry.unregister(a).is_none());
        assert_eq!(registry.chart(a).unwrap_err(), ChartError::UnknownChart(a));
    }

    #[test]
    fn test_siblings_share_group() {
        let fx = Fixture::new();
        let a = fx.register(fx.speed_options(false), vec![]);
        let b = fx.register(fx.temp_options(), vec![]);
        let mut unsynced = fx.temp_options();
        unsynced.plugins.marker_line.sync.enabled = false;
        let c = fx.register(unsynced, vec![]);

        let registry = fx.registry.borrow();
        assert_eq!(registry.siblings(a), vec![b]);
        assert!(registry.siblings(c).is_empty());
        assert_eq!(registry.chart(c).unwrap().sync_group(), None);
    }

    #[test]
    fn test_move_marker_unknown_chart() {
        let mut registry = ChartRegistry::new();
        assert_eq!(
            registry.move_marker(ChartId(4), Some(1)),
            Err(ChartError::UnknownChart(ChartId(4)))
        );
    }

    #[test]
    fn test_visibility_override() {
        let fx = Fixture::new();
        let id = fx.register(fx.temp_options(), vec![temperature_dataset().hidden()]);
        let mut registry = fx.registry.borrow_mut();
        let chart = registry.chart_mut(id).unwrap();

        assert!(!chart.is_dataset_visible(0));
        chart.set_dataset_visibility(0, true);
        assert!(chart.is_dataset_visible(0));
        assert!(!chart.is_dataset_visible(5));
    }

    #[test]
    fn test_pixel_to_time_spans_plot_area() {
        let fx = Fixture::new();
        let id = fx.register(fx.temp_options(), vec![]);
        let registry = fx.registry.borrow();
        let chart = registry.chart(id).unwrap();
        let dims = chart.dimensions;

        assert_eq!(chart.time_at_pixel(dims.plot_left()), START);
        assert_eq!(chart.time_at_pixel(dims.plot_right()), END);
    }

    #[test]
    fn test_zoom_updates_options_and_revision() {
        let fx = Fixture::new();
        let id = fx.register(fx.temp_options(), vec![]);
        let mut registry = fx.registry.borrow_mut();
        let chart = registry.chart_mut(id).unwrap();

        let applied = chart.zoom(TimeRange::new(START + HOUR, START + 3 * HOUR));
        assert_eq!(chart.options.scales.x.min, applied.min);
        assert_eq!(chart.options.scales.x.max, applied.max);
        assert_eq!(chart.revision(), 1);
    }
}
