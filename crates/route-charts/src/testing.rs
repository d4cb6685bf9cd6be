//! Recording collaborators and chart fixtures for unit tests

use crate::*;
use chrono::FixedOffset;
use route_core::{ChartPoint, DeviceStatus, EnglishUnits, SpeedPoint, TemperaturePoint};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const HOUR: i64 = 3_600_000;
/// 2024-06-01T00:00:00Z
pub const START: i64 = 1_717_200_000_000;
pub const END: i64 = START + 24 * HOUR;
pub const ACCENT: &str = "#ff00aa";

#[derive(Default)]
pub struct RecordingMap {
    pub selected: RefCell<Vec<MapPoint>>,
    pub pinned: RefCell<Vec<MapPoint>>,
}

impl MapCollaborator for RecordingMap {
    fn set_selected_chart_point(&self, point: MapPoint) {
        self.selected.borrow_mut().push(point);
    }

    fn add_pinned_marker(&self, point: MapPoint) {
        self.pinned.borrow_mut().push(point);
    }
}

#[derive(Default)]
pub struct RecordingTooltip {
    pub speed: RefCell<Vec<Vec<LegendLine>>>,
    pub temp: RefCell<Vec<Vec<LegendLine>>>,
    pub titles: RefCell<Vec<Option<String>>>,
}

impl TooltipCollaborator for RecordingTooltip {
    fn set_speed_legend_lines(&self, lines: Vec<LegendLine>) {
        self.speed.borrow_mut().push(lines);
    }

    fn set_temp_legend_lines(&self, lines: Vec<LegendLine>) {
        self.temp.borrow_mut().push(lines);
    }

    fn set_title(&self, title: Option<String>) {
        self.titles.borrow_mut().push(title);
    }
}

pub struct StaticAuth {
    format: Option<String>,
    offset: FixedOffset,
}

impl StaticAuth {
    pub fn utc() -> Self {
        Self {
            format: None,
            offset: FixedOffset::east_opt(0).expect("zero offset"),
        }
    }
}

impl AuthCollaborator for StaticAuth {
    fn date_format(&self) -> Option<String> {
        self.format.clone()
    }

    fn utc_offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Map that reads the registry back while handling a point
pub struct ReentrantMap {
    pub registry: Rc<RefCell<ChartRegistry>>,
    pub calls: Cell<u32>,
}

impl MapCollaborator for ReentrantMap {
    fn set_selected_chart_point(&self, _point: MapPoint) {
        let _charts = self.registry.borrow_mut().len();
        self.calls.set(self.calls.get() + 1);
    }

    fn add_pinned_marker(&self, _point: MapPoint) {
        let _charts = self.registry.borrow_mut().len();
        self.calls.set(self.calls.get() + 1);
    }
}

pub struct StaticTheme;

impl ThemeCollaborator for StaticTheme {
    fn accent_color(&self) -> String {
        ACCENT.to_string()
    }
}

pub struct Fixture {
    pub service: VehicleRoutesChartService,
    pub registry: Rc<RefCell<ChartRegistry>>,
    pub map: Rc<RecordingMap>,
    pub tooltip: Rc<RecordingTooltip>,
    pub fetches: Rc<Cell<u32>>,
    offset: FixedOffset,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_user_format(None, 0)
    }

    pub fn with_user_format(format: Option<&str>, offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(offset_minutes * 60).expect("offset in range");
        let registry = Rc::new(RefCell::new(ChartRegistry::new()));
        let map = Rc::new(RecordingMap::default());
        let tooltip = Rc::new(RecordingTooltip::default());
        let collaborators = Collaborators {
            map: map.clone(),
            tooltip: tooltip.clone(),
            auth: Rc::new(StaticAuth {
                format: format.map(str::to_string),
                offset,
            }),
            theme: Rc::new(StaticTheme),
            translator: Rc::new(EnglishUnits),
        };
        Self {
            service: VehicleRoutesChartService::new(Rc::clone(&registry), collaborators),
            registry,
            map,
            tooltip,
            fetches: Rc::new(Cell::new(0)),
            offset,
        }
    }

    fn init(&self, is_speed: bool, route_optimization: bool) -> ChartOptions {
        let fetches = Rc::clone(&self.fetches);
        self.service.init_chart_options(
            InitOptions {
                date_range: DateRange::from_millis(START, END, self.offset).expect("valid range"),
                is_speed,
                is_temp: !is_speed,
                on_zoom: None,
            },
            FetchHook::new(move || fetches.set(fetches.get() + 1)),
            route_optimization,
        )
    }

    pub fn speed_options(&self, route_optimization: bool) -> ChartOptions {
        self.init(true, route_optimization)
    }

    pub fn temp_options(&self) -> ChartOptions {
        self.init(false, false)
    }

    pub fn register(&self, options: ChartOptions, datasets: Vec<Dataset>) -> ChartId {
        self.registry.borrow_mut().register(options, datasets)
    }

    pub fn set_marker(&self, id: ChartId, t: i64) {
        self.registry
            .borrow_mut()
            .chart_mut(id)
            .expect("registered chart")
            .set_marker(Some(t));
    }

    pub fn lines_at(&self, id: ChartId, t: i64) -> Vec<LegendLine> {
        self.set_marker(id, t);
        let registry = self.registry.borrow();
        self.service.body_lines(registry.chart(id).expect("registered chart"))
    }

    pub fn tooltip_at(&self, id: ChartId, t: i64) {
        self.set_marker(id, t);
        let registry = self.registry.borrow();
        self.service.set_tooltip_data(registry.chart(id).expect("registered chart"));
    }
}

/// Driving, then idling, then stopped without a GPS fix
pub fn speed_dataset() -> Dataset {
    let points: Vec<ChartPoint> = vec![
        SpeedPoint::new(START, 42.0, DeviceStatus::Driving).at(52.0, 21.0).into(),
        SpeedPoint::new(START + 60_000, 3.0, DeviceStatus::Idling).at(52.1, 21.1).into(),
        SpeedPoint::new(START + 120_000, 0.0, DeviceStatus::Stopped).into(),
    ];
    Dataset::new("Speed", points).with_border_color("#222222")
}

pub fn temperature_dataset() -> Dataset {
    let points: Vec<ChartPoint> = vec![
        TemperaturePoint::new(START, 4.5, "Cargo").into(),
        TemperaturePoint::new(START + 60_000, 5.0, "Cargo").into(),
    ];
    Dataset::new("Cargo", points).with_border_color(route_core::colors::TEMPERATURE)
}
