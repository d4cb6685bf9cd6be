//! Mock route telemetry for demo/development

use rand::Rng;
use route_charts::Dataset;
use route_core::{colors, ChartPoint, DeviceStatus, SpeedPoint, TemperaturePoint};

/// Sampling step of the mock tracker
pub const SAMPLE_INTERVAL_MS: i64 = 60_000;

struct MockVehicle {
    lat: f64,
    lng: f64,
    heading: f64,
    speed: f64,
    status: DeviceStatus,
    cargo_temp: f64,
    cabin_temp: f64,
}

impl MockVehicle {
    fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            heading: 0.0,
            speed: 0.0,
            status: DeviceStatus::Stopped,
            cargo_temp: 4.0,
            cabin_temp: 21.0,
        }
    }

    fn next_status(&self) -> DeviceStatus {
        let mut rng = rand::thread_rng();
        let roll = rng.r#gen::<f64>();
        match self.status {
            DeviceStatus::Driving if roll < 0.05 => DeviceStatus::Idling,
            DeviceStatus::Driving => DeviceStatus::Driving,
            DeviceStatus::Idling if roll < 0.3 => DeviceStatus::Driving,
            DeviceStatus::Idling if roll < 0.4 => DeviceStatus::Stopped,
            DeviceStatus::Idling => DeviceStatus::Idling,
            DeviceStatus::Stopped if roll < 0.1 => DeviceStatus::Driving,
            DeviceStatus::Stopped if roll < 0.12 => DeviceStatus::Offline,
            DeviceStatus::Stopped => DeviceStatus::Stopped,
            DeviceStatus::Offline if roll < 0.2 => DeviceStatus::Stopped,
            DeviceStatus::Offline => DeviceStatus::Offline,
        }
    }

    fn tick(&mut self, x: i64) -> (SpeedPoint, f64, f64) {
        let mut rng = rand::thread_rng();
        self.status = self.next_status();

        self.speed = match self.status {
            DeviceStatus::Driving => {
                let target = rng.gen_range(30.0..90.0);
                (self.speed + (target - self.speed) * 0.3).max(5.0)
            }
            DeviceStatus::Idling => rng.r#gen::<f64>() * 3.0,
            DeviceStatus::Stopped | DeviceStatus::Offline => 0.0,
        };

        if self.status == DeviceStatus::Driving {
            self.heading += (rng.r#gen::<f64>() - 0.5) * 0.6;
            // km per minute, roughly 111 km per degree
            let step = self.speed / 60.0 / 111.0;
            self.lat += step * self.heading.cos();
            self.lng += step * self.heading.sin();
        }

        self.cargo_temp += (rng.r#gen::<f64>() - 0.5) * 0.4;
        self.cabin_temp += (rng.r#gen::<f64>() - 0.5) * 0.2;

        let point = SpeedPoint::new(x, (self.speed * 10.0).round() / 10.0, self.status);
        let point = match self.status {
            DeviceStatus::Offline => point,
            _ => point.at(self.lat, self.lng),
        };
        (point, self.cargo_temp, self.cabin_temp)
    }
}

/// One generated route
pub struct MockRoute {
    pub speed: Vec<ChartPoint>,
    pub cargo: Vec<ChartPoint>,
    pub cabin: Vec<ChartPoint>,
}

impl MockRoute {
    pub fn generate(start: i64, end: i64) -> Self {
        let mut vehicle = MockVehicle::new(52.2297, 21.0122);
        let capacity = ((end - start) / SAMPLE_INTERVAL_MS).max(0) as usize + 1;
        let mut route = Self {
            speed: Vec::with_capacity(capacity),
            cargo: Vec::with_capacity(capacity),
            cabin: Vec::with_capacity(capacity),
        };

        let mut x = start;
        while x <= end {
            let (point, cargo, cabin) = vehicle.tick(x);
            route.speed.push(point.into());
            route.cargo.push(TemperaturePoint::new(x, round1(cargo), "Cargo").into());
            route.cabin.push(TemperaturePoint::new(x, round1(cabin), "Cabin").into());
            x += SAMPLE_INTERVAL_MS;
        }

        tracing::info!(samples = route.speed.len(), "mock route generated");
        route
    }

    pub fn speed_datasets(&self) -> Vec<Dataset> {
        vec![Dataset::new("Speed", self.speed.clone()).with_border_color(colors::ACCENT)]
    }

    pub fn temperature_datasets(&self) -> Vec<Dataset> {
        vec![
            Dataset::new("Cargo", self.cargo.clone()).with_border_color(colors::TEMPERATURE),
            Dataset::new("Cabin", self.cabin.clone()).with_border_color(colors::IDLING),
        ]
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_is_sampled_and_ordered() {
        let route = MockRoute::generate(0, 10 * SAMPLE_INTERVAL_MS);
        assert_eq!(route.speed.len(), 11);
        assert_eq!(route.cargo.len(), 11);
        assert!(route.speed.windows(2).all(|w| w[0].x() < w[1].x()));
    }

    #[test]
    fn test_offline_points_have_no_coordinate() {
        let route = MockRoute::generate(0, 500 * SAMPLE_INTERVAL_MS);
        for point in &route.speed {
            if let ChartPoint::Speed(p) = point {
                if p.status == DeviceStatus::Offline {
                    assert!(p.located().is_none());
                } else {
                    assert!(p.located().is_some());
                }
            }
        }
    }
}
