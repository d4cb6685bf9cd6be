//! Route chart service: option building and interaction handling

use crate::chartkit::{RangeLimits, TimeRange};
use crate::collaborators::{Collaborators, MapPoint};
use crate::engine::{Chart, ChartEvent, ChartId, ChartRegistry, Dataset, InteractionEvent};
use crate::error::{ChartError, ChartResult};
use crate::legend::{active_point, LegendLine};
use crate::options::*;
use crate::ChartSettings;
use chrono::{DateTime, FixedOffset};
use leptos::prelude::{ArcRwSignal, GetUntracked, Set};
use route_core::{custom_speed_legend, date_formats, ChartPoint, DeviceStatus};
use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;
use tracing::{debug, warn};

// ============================================================================
// INIT OPTIONS
// ============================================================================

/// Route time window in the caller's timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> ChartResult<Self> {
        if end < start {
            return Err(ChartError::InvalidDateRange {
                start: start.timestamp_millis(),
                end: end.timestamp_millis(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn from_millis(start: i64, end: i64, offset: FixedOffset) -> ChartResult<Self> {
        let to_local = |ms: i64| {
            DateTime::from_timestamp_millis(ms)
                .map(|dt| dt.with_timezone(&offset))
                .ok_or(ChartError::TimestampOutOfRange(ms))
        };
        Self::new(to_local(start)?, to_local(end)?)
    }

    pub fn as_time_range(&self) -> TimeRange {
        TimeRange::new(self.start.timestamp_millis(), self.end.timestamp_millis())
    }
}

/// Per-chart inputs to [`VehicleRoutesChartService::init_chart_options`]
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub date_range: DateRange,
    pub is_speed: bool,
    pub is_temp: bool,
    pub on_zoom: Option<ChartHook>,
}

// ============================================================================
// SERVICE
// ============================================================================

pub struct VehicleRoutesChartService {
    registry: Rc<RefCell<ChartRegistry>>,
    collaborators: Collaborators,
    settings: ChartSettings,
    select_time: ArcRwSignal<Option<String>>,
}

impl VehicleRoutesChartService {
    pub fn new(registry: Rc<RefCell<ChartRegistry>>, collaborators: Collaborators) -> Self {
        Self {
            registry,
            collaborators,
            settings: ChartSettings::default(),
            select_time: ArcRwSignal::new(None),
        }
    }

    pub fn with_settings(mut self, settings: ChartSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry(&self) -> Rc<RefCell<ChartRegistry>> {
        Rc::clone(&self.registry)
    }

    /// Formatted crosshair time, updated on every crosshair move
    pub fn select_time(&self) -> ArcRwSignal<Option<String>> {
        self.select_time.clone()
    }

    pub fn min_chart_range(&self) -> i64 {
        self.settings.min_chart_range_ms
    }

    pub fn chart_type(&self) -> ChartType {
        ChartType::Line
    }

    /// User date format followed by the time of day
    pub fn date_format(&self) -> String {
        let date = self
            .collaborators
            .auth
            .date_format()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| date_formats::DATE.to_string());
        format!("{} %H:%M:%S", date)
    }

    // ========================================================================
    // Options
    // ========================================================================

    pub fn init_chart_options(
        &self,
        options: InitOptions,
        fetch_data: FetchHook,
        route_optimization: bool,
    ) -> ChartOptions {
        let InitOptions {
            date_range,
            is_speed,
            is_temp,
            on_zoom,
        } = options;
        let window = date_range.as_time_range();
        let accent_color = self.collaborators.theme.accent_color();
        let refetch = (is_speed && route_optimization).then_some(fetch_data);

        debug!(min = window.min, max = window.max, is_speed, is_temp, "building chart options");

        ChartOptions {
            events: EventKind::all().to_vec(),
            responsive: true,
            animation: false,
            transitions: Transitions {
                zoom: Transition {
                    animation: AnimationOptions { duration: 0 },
                },
            },
            elements: Elements {
                point: PointElement { radius: 0.0 },
                line: LineElement { tension: 0.0 },
            },
            parsing: false,
            interaction: InteractionOptions {
                mode: Axis::X,
                intersect: false,
                axis: Axis::X,
            },
            maintain_aspect_ratio: false,
            plugins: self.plugins_options(window, is_speed, refetch, accent_color, on_zoom),
            scales: ScalesOptions {
                y: if is_speed {
                    YAxisOptions::speed()
                } else {
                    YAxisOptions::temperature()
                },
                x: XAxisOptions::time(window.min, window.max),
            },
        }
    }

    fn plugins_options(
        &self,
        window: TimeRange,
        is_speed: bool,
        refetch: Option<FetchHook>,
        accent_color: String,
        on_zoom: Option<ChartHook>,
    ) -> PluginOptions {
        PluginOptions {
            marker_line: MarkerLineOptions {
                line: MarkerLineStyle {
                    color: self.settings.marker_line_color.clone(),
                    width: self.settings.marker_line_width,
                    dash_pattern: Vec::new(),
                },
                sync: SyncOptions {
                    enabled: true,
                    group: self.settings.sync_group,
                },
            },
            tooltip: Toggle { enabled: false },
            html_legend: HtmlLegendOptions {
                enabled: true,
                custom_legends: is_speed.then(|| CustomLegends {
                    items: custom_speed_legend(),
                    toggle: false,
                }),
            },
            zoom: ZoomPluginOptions {
                zoom: ZoomOptions {
                    mode: Axis::X,
                    wheel: Toggle { enabled: true },
                    drag: DragOptions {
                        enabled: true,
                        border_color: accent_color,
                        border_width: 1.0,
                    },
                    on_zoom,
                    on_zoom_complete: refetch.clone(),
                },
                pan: PanOptions {
                    enabled: true,
                    mode: Axis::X,
                    modifier_key: ModifierKey::Shift,
                    on_pan_complete: refetch,
                },
                limits: ZoomLimits {
                    x: RangeLimits {
                        min: window.min,
                        max: window.max,
                        min_range: self.settings.min_chart_range_ms,
                    },
                },
            },
            legend: LegendOptions { display: false },
        }
    }

    /// Tick label with the axis unit
    pub fn format_y_tick(&self, axis: &YAxisOptions, value: f64) -> String {
        let raw = if value.fract() == 0.0 {
            format!("{:.0}", value)
        } else {
            format!("{:.*}", usize::from(axis.ticks.precision), value)
        };
        self.collaborators.translator.translate(axis.unit, &raw)
    }

    // ========================================================================
    // Legend
    // ========================================================================

    /// Legend rows for the chart's crosshair position.
    ///
    /// Also publishes the crosshair time to [`Self::select_time`] and the
    /// hovered speed sample to the map.
    pub fn body_lines(&self, chart: &Chart) -> Vec<LegendLine> {
        let Some(value_x) = chart.marker_line().value_x else {
            return Vec::new();
        };
        self.select_time.set(self.format_timestamp(value_x));

        chart
            .datasets
            .iter()
            .enumerate()
            .filter(|(index, dataset)| chart.is_dataset_visible(*index) && !dataset.invisible_info)
            .map(|(_, dataset)| dataset)
            .enumerate()
            .map(|(index, dataset)| self.to_line(dataset, index, value_x))
            .collect()
    }

    fn to_line(&self, dataset: &Dataset, index: usize, value_x: i64) -> LegendLine {
        let Some(point) = active_point(&dataset.data, value_x) else {
            return LegendLine::placeholder(dataset, index);
        };
        if let ChartPoint::Speed(speed) = point {
            if let Some(coordinate) = speed.located() {
                self.collaborators.map.set_selected_chart_point(MapPoint::new(
                    speed.speed,
                    speed.status,
                    coordinate,
                ));
            }
        }
        LegendLine::for_point(point, dataset, index)
    }

    fn format_timestamp(&self, value_x: i64) -> Option<String> {
        let local = DateTime::from_timestamp_millis(value_x)?
            .with_timezone(&self.collaborators.auth.utc_offset());

        let mut formatted = String::new();
        if write!(formatted, "{}", local.format(&self.date_format())).is_err() {
            warn!(format = %self.date_format(), "invalid date format, using default");
            formatted.clear();
            write!(formatted, "{}", local.format(date_formats::DATE_TIME_FULL)).ok()?;
        }
        Some(formatted)
    }

    /// Push the chart's legend rows to the tooltip panel
    pub fn set_tooltip_data(&self, chart: &Chart) {
        let lines = self.body_lines(chart);
        let Some(first) = lines.first() else {
            return;
        };

        if first.is_speed() {
            self.collaborators.tooltip.set_speed_legend_lines(lines);
        } else {
            self.collaborators.tooltip.set_temp_legend_lines(lines);
        }
        self.collaborators
            .tooltip
            .set_title(self.select_time.get_untracked());
    }

    /// Pin the speed sample under the click on the map
    pub fn click_line(&self, chart: &Chart) {
        let lines = self.body_lines(chart);
        let Some(line) = lines.iter().find(|line| line.is_speed()) else {
            return;
        };

        let (Some(speed), Ok(status), Some(coordinate)) = (
            line.value.as_f64(),
            line.label.parse::<DeviceStatus>(),
            line.coordinate,
        ) else {
            debug!(chart = %chart.id(), "speed line without position, nothing to pin");
            return;
        };

        self.collaborators
            .map
            .add_pinned_marker(MapPoint::new(speed, status, coordinate));
    }

    // ========================================================================
    // Range sync
    // ========================================================================

    /// Copy the active chart's x window onto every other chart of its group
    pub fn update_time_min_max(&self, active: ChartId) {
        let mut registry = self.registry.borrow_mut();
        let (range, group) = match registry.chart(active) {
            Ok(chart) => (chart.x_scale(), chart.sync_group()),
            Err(err) => {
                warn!(%err, "range sync skipped");
                return;
            }
        };
        let Some(group) = group else {
            return;
        };

        for chart in registry
            .iter_mut()
            .filter(|c| c.id() != active && c.sync_group() == Some(group))
        {
            chart.options.scales.x.min = range.min;
            chart.options.scales.x.max = range.max;
            chart.update();
            debug!(from = %active, to = %chart.id(), min = range.min, max = range.max, "x range synced");
        }
    }

    /// Pan handler; `false` tells the engine not to redraw on its own
    pub fn on_pan(&self, chart: ChartId) -> bool {
        self.update_time_min_max(chart);
        false
    }

    /// Keep the zoom gesture from reaching the map underneath
    pub fn on_zoom_start(&self, event: &mut InteractionEvent) {
        event.stop_propagation();
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Route an engine event to the matching handler
    pub fn handle_event(&self, id: ChartId, event: ChartEvent) -> InteractionEvent {
        let mut interaction = InteractionEvent::default();
        let result = match event {
            ChartEvent::Pointer { kind, px } => self.on_pointer(id, kind, px),
            ChartEvent::ZoomStart => {
                self.on_zoom_start(&mut interaction);
                Ok(())
            }
            ChartEvent::Zoom { range } => self.on_zoom(id, range),
            ChartEvent::Pan { delta_ms } => self.on_pan_by(id, delta_ms),
        };
        if let Err(err) = result {
            warn!(%err, "chart event dropped");
        }
        interaction
    }

    fn on_pointer(&self, id: ChartId, kind: EventKind, px: f64) -> ChartResult<()> {
        let touched = {
            let mut registry = self.registry.borrow_mut();
            let chart = registry.chart(id)?;
            if !chart.options.listens_to(kind) {
                debug!(chart = %id, ?kind, "event not configured");
                return Ok(());
            }
            let value_x = match kind {
                EventKind::MouseOut => None,
                _ => Some(chart.time_at_pixel(px)),
            };
            registry.move_marker(id, value_x)?
        };

        // Snapshots so collaborators may re-enter the registry
        let snapshots: Vec<Chart> = {
            let registry = self.registry.borrow();
            match kind {
                EventKind::MouseOut => Vec::new(),
                EventKind::Click => vec![registry.chart(id)?.clone()],
                _ => touched
                    .iter()
                    .filter_map(|t| registry.get(*t))
                    .cloned()
                    .collect(),
            }
        };

        match kind {
            EventKind::MouseOut => {}
            EventKind::Click => snapshots.iter().for_each(|chart| self.click_line(chart)),
            _ => snapshots.iter().for_each(|chart| self.set_tooltip_data(chart)),
        }
        Ok(())
    }

    fn on_zoom(&self, id: ChartId, requested: TimeRange) -> ChartResult<()> {
        let snapshot = {
            let mut registry = self.registry.borrow_mut();
            let chart = registry.chart_mut(id)?;
            let applied = chart.zoom(requested);
            debug!(chart = %id, min = applied.min, max = applied.max, "zoomed");
            chart.clone()
        };

        self.update_time_min_max(id);

        let zoom = &snapshot.options.plugins.zoom.zoom;
        if let Some(hook) = &zoom.on_zoom {
            hook.call(&snapshot);
        }
        if let Some(fetch) = &zoom.on_zoom_complete {
            fetch.call();
        }
        Ok(())
    }

    fn on_pan_by(&self, id: ChartId, delta_ms: i64) -> ChartResult<()> {
        let on_complete = {
            let mut registry = self.registry.borrow_mut();
            let chart = registry.chart_mut(id)?;
            chart.pan(delta_ms);
            chart.options.plugins.zoom.pan.on_pan_complete.clone()
        };

        self.on_pan(id);

        if let Some(fetch) = on_complete {
            fetch.call();
        }
        Ok(())
    }
}
