//! Drives the route chart service against mock telemetry and logs what the
//! tooltip panel, map and shared crosshair time would show.

mod mock;

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use chrono::Utc;
use leptos::prelude::GetUntracked;
use route_charts::{
    AuthCollaborator, ChartEvent, ChartHook, ChartId, ChartRegistry, DateRange, EventKind, FetchHook, InitOptions,
    ThemeCollaborator, TimeRange, VehicleRoutesChartService,
};
use route_core::{AppConfig, EnglishUnits, Timezone, User, UserAttributes};
use route_state::AppState;
use tracing::{info, warn};

use mock::MockRoute;

const ROUTE_HOURS: i64 = 8;

fn demo_user(config: &AppConfig) -> User {
    let attrs = UserAttributes {
        id: "demo".into(),
        name: "Dispatch".into(),
        surname: "Desk".into(),
        email: "dispatch@example.com".into(),
        picture: Some("avatars/dispatch.png".into()),
        date_format: Some("%Y-%m-%d".into()),
        timezone: Some(Timezone {
            name: "Europe/Warsaw".into(),
            utc_offset_minutes: 120,
        }),
        ..Default::default()
    };
    User::new(attrs, &config.file_url)
}

fn log_panel(state: &AppState, service: &VehicleRoutesChartService) {
    let title = state.tooltip.title.get_untracked();
    let select_time = service.select_time().get_untracked();
    info!(?title, ?select_time, "crosshair");

    for line in state.tooltip.speed_lines.get_untracked() {
        info!(label = %line.label, value = %line.value, kind = ?line.kind, "speed line");
    }
    for line in state.tooltip.temp_lines.get_untracked() {
        info!(label = %line.label, value = %line.value, "temperature line");
    }
    if let Some(point) = state.map.selected_point.get_untracked() {
        info!(lat = point.lat, lng = point.lng, speed = point.speed, "map marker");
    }
}

fn plot_center(registry: &RefCell<ChartRegistry>, id: ChartId) -> f64 {
    registry
        .borrow()
        .get(id)
        .map(|chart| (chart.dimensions.plot_left() + chart.dimensions.plot_right()) / 2.0)
        .unwrap_or_default()
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|err| {
        warn!(%err, "falling back to default configuration");
        AppConfig::default()
    });

    let state = AppState::new(config.clone());
    state.theme.toggle_mode();
    info!(
        mode = ?state.theme.current.get_untracked().mode,
        accent = %state.theme.accent_color(),
        "theme"
    );
    let user = demo_user(&config);
    info!(name = %user.full_name(), picture = ?user.picture(), "demo user");
    state.session.sign_in(user);

    let registry = Rc::new(RefCell::new(ChartRegistry::new()));
    let service = VehicleRoutesChartService::new(
        Rc::clone(&registry),
        state.collaborators(Rc::new(EnglishUnits)),
    );

    let end = Utc::now().timestamp_millis();
    let start = end - ROUTE_HOURS * 3_600_000;
    let offset = state.session.utc_offset();
    let route = MockRoute::generate(start, end);

    let init = |is_speed: bool| -> Result<InitOptions, Box<dyn Error>> {
        Ok(InitOptions {
            date_range: DateRange::from_millis(start, end, offset)?,
            is_speed,
            is_temp: !is_speed,
            on_zoom: Some(ChartHook::new(|chart| {
                let range = chart.x_scale();
                info!(chart = %chart.id(), min = range.min, max = range.max, "zoom applied");
            })),
        })
    };
    let fetch = FetchHook::new(|| info!("refetching route for the new window"));

    let speed_options = service.init_chart_options(init(true)?, fetch.clone(), true);
    let temp_options = service.init_chart_options(init(false)?, fetch, true);
    info!(options = %speed_options.to_json(), "speed chart options");

    let speed_chart = registry
        .borrow_mut()
        .register(speed_options, route.speed_datasets());
    let temp_chart = registry
        .borrow_mut()
        .register(temp_options, route.temperature_datasets());

    // Hover the middle of the speed chart; the temperature chart follows
    let center = plot_center(&registry, speed_chart);
    service.handle_event(
        speed_chart,
        ChartEvent::Pointer {
            kind: EventKind::MouseMove,
            px: center,
        },
    );
    log_panel(&state, &service);

    service.handle_event(
        speed_chart,
        ChartEvent::Pointer {
            kind: EventKind::Click,
            px: center,
        },
    );
    info!(pins = state.map.pinned_count(), "after click");

    service.handle_event(
        temp_chart,
        ChartEvent::Pointer {
            kind: EventKind::MouseOut,
            px: 0.0,
        },
    );

    // A one minute window is widened to the minimum range
    let mid = start + (end - start) / 2;
    service.handle_event(temp_chart, ChartEvent::ZoomStart);
    service.handle_event(
        temp_chart,
        ChartEvent::Zoom {
            range: TimeRange::new(mid, mid + 60_000),
        },
    );
    service.handle_event(speed_chart, ChartEvent::Pan { delta_ms: 30 * 60_000 });

    for chart in registry.borrow().iter() {
        let range = chart.x_scale();
        info!(chart = %chart.id(), min = range.min, max = range.max, revision = chart.revision(), "final window");
    }

    Ok(())
}
