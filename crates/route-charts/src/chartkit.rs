//! # chartkit
//!
//! Core time-axis primitives: the visible range, pixel/time conversion and
//! the range limiter applied by zoom and pan.

use serde::{Deserialize, Serialize};

// ============================================================================
// TIME RANGE
// ============================================================================

/// Visible x-axis window in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: i64,
    pub max: i64,
}

impl TimeRange {
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn span(&self) -> i64 {
        self.max - self.min
    }

    pub fn center(&self) -> i64 {
        self.min + self.span() / 2
    }

    pub fn shifted(&self, delta: i64) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

// ============================================================================
// TIME SCALE
// ============================================================================

/// Pixel-to-time scale across the plot area
#[derive(Debug, Clone)]
pub struct TimeScale {
    domain: (i64, i64),
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: i64, max: i64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Inverse scale (pixel to timestamp)
    pub fn invert(&self, value: f64) -> i64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max - d_min) as f64).round() as i64
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RANGE LIMITER
// ============================================================================

/// Bounds the x-axis may never leave, plus the smallest visible span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeLimits {
    pub min: i64,
    pub max: i64,
    pub min_range: i64,
}

impl RangeLimits {
    /// Clamp a requested window so it stays inside the bounds and never
    /// shrinks below `min_range` (or the whole bounds when they are
    /// narrower than that).
    pub fn clamp(&self, requested: TimeRange) -> TimeRange {
        let bounds = TimeRange::new(self.min, self.max);
        let min_span = self.min_range.min(bounds.span()).max(0);

        let mut range = requested;
        if range.span() < min_span {
            let min = range.center() - min_span / 2;
            range = TimeRange {
                min,
                max: min + min_span,
            };
        }
        if range.span() >= bounds.span() {
            return bounds;
        }
        if range.min < bounds.min {
            range = range.shifted(bounds.min - range.min);
        }
        if range.max > bounds.max {
            range = range.shifted(bounds.max - range.max);
        }
        range
    }

    /// Shift keeping the span, stopping at the bounds
    pub fn pan(&self, current: TimeRange, delta: i64) -> TimeRange {
        self.clamp(current.shifted(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MINUTE: i64 = 60_000;

    fn limits() -> RangeLimits {
        RangeLimits {
            min: 0,
            max: 24 * 60 * MINUTE,
            min_range: 12 * MINUTE,
        }
    }

    #[test]
    fn test_time_scale_invert() {
        let scale = TimeScale::new().domain(1_000, 2_000).range(0.0, 500.0);
        assert_eq!(scale.invert(250.0), 1_500);
        assert_eq!(scale.invert(500.0), 2_000);

        let flat = TimeScale::new().domain(1_000, 2_000).range(10.0, 10.0);
        assert_eq!(flat.invert(10.0), 1_500);
    }

    #[test]
    fn test_zoom_below_min_range_is_widened() {
        let range = limits().clamp(TimeRange::new(60 * MINUTE, 61 * MINUTE));
        assert_eq!(range.span(), 12 * MINUTE);
        assert_eq!(range.center(), 60 * MINUTE + 30_000);
    }

    #[test]
    fn test_zoom_outside_bounds_is_shifted_back() {
        let range = limits().clamp(TimeRange::new(-30 * MINUTE, 30 * MINUTE));
        assert_eq!(range, TimeRange::new(0, 60 * MINUTE));
    }

    #[test]
    fn test_zoom_out_past_bounds_shows_everything() {
        let l = limits();
        assert_eq!(l.clamp(TimeRange::new(-1, l.max + 1)), TimeRange::new(l.min, l.max));
    }

    #[test]
    fn test_pan_stops_at_edge() {
        let l = limits();
        let current = TimeRange::new(l.max - 60 * MINUTE, l.max - 30 * MINUTE);
        let panned = l.pan(current, 90 * MINUTE);
        assert_eq!(panned.max, l.max);
        assert_eq!(panned.span(), 30 * MINUTE);
    }

    proptest! {
        #[test]
        fn prop_min_range_never_violated(a in -MINUTE..(25 * 60 * MINUTE), len in 0i64..(26 * 60 * MINUTE)) {
            let l = limits();
            let range = l.clamp(TimeRange::new(a, a + len));
            prop_assert!(range.span() >= l.min_range);
            prop_assert!(range.min >= l.min && range.max <= l.max);
        }
    }
}
