//! Declarative chart configuration tree
//!
//! Serializes to the camelCase option layout of the line-chart engine.
//! Callbacks are carried alongside the tree but never serialized.

use crate::chartkit::RangeLimits;
use crate::engine::Chart;
use route_core::{date_formats, StatusLegendItem, TranslationKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

// ============================================================================
// CALLBACKS
// ============================================================================

/// Shared callback attached to the configuration
pub struct Callback<F: ?Sized>(Rc<F>);

impl<F: ?Sized> Callback<F> {
    pub fn from_rc(f: Rc<F>) -> Self {
        Self(f)
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<F: ?Sized> std::fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Invoked with the zoomed chart
pub type ChartHook = Callback<dyn Fn(&Chart)>;
/// Reloads chart data after a zoom/pan settles
pub type FetchHook = Callback<dyn Fn()>;

impl ChartHook {
    pub fn new(f: impl Fn(&Chart) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, chart: &Chart) {
        (self.0)(chart)
    }
}

impl FetchHook {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

// ============================================================================
// ENUMS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
}

/// DOM events the chart listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    MouseMove,
    MouseOut,
    Click,
    TouchStart,
    TouchMove,
    PointerUp,
    PointerDown,
    MouseDown,
    MouseUp,
}

impl EventKind {
    pub fn all() -> &'static [Self] {
        &[
            Self::MouseMove,
            Self::MouseOut,
            Self::Click,
            Self::TouchStart,
            Self::TouchMove,
            Self::PointerUp,
            Self::PointerDown,
            Self::MouseDown,
            Self::MouseUp,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Xy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleType {
    Linear,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

// ============================================================================
// ROOT
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub events: Vec<EventKind>,
    pub responsive: bool,
    pub animation: bool,
    pub transitions: Transitions,
    pub elements: Elements,
    pub parsing: bool,
    pub interaction: InteractionOptions,
    pub maintain_aspect_ratio: bool,
    pub plugins: PluginOptions,
    pub scales: ScalesOptions,
}

impl ChartOptions {
    pub fn to_json(&self) -> serde_json::Value {
        // Every field is a plain value or string-keyed map.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn listens_to(&self, kind: EventKind) -> bool {
        self.events.contains(&kind)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Transitions {
    pub zoom: Transition,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub animation: AnimationOptions,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnimationOptions {
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Elements {
    pub point: PointElement,
    pub line: LineElement,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PointElement {
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LineElement {
    pub tension: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InteractionOptions {
    pub mode: Axis,
    pub intersect: bool,
    pub axis: Axis,
}

// ============================================================================
// PLUGINS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    pub marker_line: MarkerLineOptions,
    pub tooltip: Toggle,
    pub html_legend: HtmlLegendOptions,
    pub zoom: ZoomPluginOptions,
    pub legend: LegendOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggle {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerLineOptions {
    pub line: MarkerLineStyle,
    pub sync: SyncOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLineStyle {
    pub color: String,
    pub width: f64,
    pub dash_pattern: Vec<f64>,
}

/// Charts sharing a group mirror crosshair and x range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncOptions {
    pub enabled: bool,
    pub group: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlLegendOptions {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_legends: Option<CustomLegends>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomLegends {
    pub items: Vec<StatusLegendItem>,
    pub toggle: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LegendOptions {
    pub display: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZoomPluginOptions {
    pub zoom: ZoomOptions,
    pub pan: PanOptions,
    pub limits: ZoomLimits,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomOptions {
    pub mode: Axis,
    pub wheel: Toggle,
    pub drag: DragOptions,
    #[serde(skip)]
    pub on_zoom: Option<ChartHook>,
    #[serde(skip)]
    pub on_zoom_complete: Option<FetchHook>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragOptions {
    pub enabled: bool,
    pub border_color: String,
    pub border_width: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanOptions {
    pub enabled: bool,
    pub mode: Axis,
    pub modifier_key: ModifierKey,
    #[serde(skip)]
    pub on_pan_complete: Option<FetchHook>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ZoomLimits {
    pub x: RangeLimits,
}

// ============================================================================
// SCALES
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ScalesOptions {
    pub y: YAxisOptions,
    pub x: XAxisOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct XAxisOptions {
    #[serde(rename = "type")]
    pub kind: ScaleType,
    pub min: i64,
    pub max: i64,
    pub time: TimeOptions,
}

impl XAxisOptions {
    pub fn time(min: i64, max: i64) -> Self {
        let display_formats = BTreeMap::from([
            (TimeUnit::Second, date_formats::SECOND),
            (TimeUnit::Minute, date_formats::FULL_TIME),
            (TimeUnit::Hour, date_formats::FULL_TIME),
            (TimeUnit::Day, date_formats::DATE),
            (TimeUnit::Week, date_formats::DATE),
            (TimeUnit::Month, date_formats::DATE),
            (TimeUnit::Quarter, date_formats::DATE),
            (TimeUnit::Year, date_formats::DATE),
        ]);
        Self {
            kind: ScaleType::Time,
            min,
            max,
            time: TimeOptions {
                min_unit: TimeUnit::Second,
                display_formats,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOptions {
    pub min_unit: TimeUnit,
    pub display_formats: BTreeMap<TimeUnit, &'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YAxisOptions {
    pub position: Position,
    #[serde(rename = "type")]
    pub kind: ScaleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    pub grid: GridOptions,
    pub ticks: TickOptions,
    /// Unit appended to tick labels
    #[serde(skip)]
    pub unit: TranslationKey,
}

impl YAxisOptions {
    /// km/h axis starting at zero
    pub fn speed() -> Self {
        Self {
            position: Position::Left,
            kind: ScaleType::Linear,
            begin_at_zero: Some(true),
            suggested_min: Some(0.0),
            min: Some(0.0),
            grid: GridOptions {
                tick_length: 3.0,
                tick_width: 1.0,
            },
            ticks: TickOptions {
                step_size: 10.0,
                precision: 1,
                padding: None,
            },
            unit: TranslationKey::KilometersPerHour,
        }
    }

    /// °C axis, free-floating
    pub fn temperature() -> Self {
        Self {
            position: Position::Left,
            kind: ScaleType::Linear,
            begin_at_zero: None,
            suggested_min: None,
            min: None,
            grid: GridOptions {
                tick_length: 6.0,
                tick_width: 1.0,
            },
            ticks: TickOptions {
                step_size: 5.0,
                precision: 1,
                padding: Some(10.0),
            },
            unit: TranslationKey::Celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub tick_length: f64,
    pub tick_width: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickOptions {
    pub step_size: f64,
    pub precision: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_presets_differ() {
        let speed = serde_json::to_value(YAxisOptions::speed()).unwrap();
        let temp = serde_json::to_value(YAxisOptions::temperature()).unwrap();

        assert_eq!(speed["beginAtZero"], true);
        assert_eq!(speed["ticks"]["stepSize"], 10.0);
        assert!(temp.get("beginAtZero").is_none());
        assert_eq!(temp["ticks"]["padding"], 10.0);
        assert_eq!(temp["grid"]["tickLength"], 6.0);
    }

    #[test]
    fn test_time_axis_formats() {
        let x = serde_json::to_value(XAxisOptions::time(1, 2)).unwrap();
        assert_eq!(x["type"], "time");
        assert_eq!(x["time"]["minUnit"], "second");
        assert_eq!(x["time"]["displayFormats"]["hour"], date_formats::FULL_TIME);
    }

    #[test]
    fn test_event_names() {
        let names = serde_json::to_value(EventKind::all()).unwrap();
        assert_eq!(names[0], "mousemove");
        assert_eq!(names[8], "mouseup");
    }
}
