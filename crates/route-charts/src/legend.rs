//! Legend lines and point lookup under the crosshair

use crate::engine::Dataset;
use route_core::{ChartPoint, Coordinate, GraphType};
use serde::{Serialize, Serializer};

/// Shown instead of a value when no sample precedes the crosshair
pub const EMPTY_VALUE: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendValue {
    Number(f64),
    Empty,
}

impl LegendValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Empty => None,
        }
    }
}

impl std::fmt::Display for LegendValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{}", v),
            Self::Empty => f.write_str(EMPTY_VALUE),
        }
    }
}

impl Serialize for LegendValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::Empty => serializer.serialize_str(EMPTY_VALUE),
        }
    }
}

/// One row of the custom legend / tooltip panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendLine {
    pub label: String,
    pub color: String,
    pub hidden: bool,
    pub dataset_index: usize,
    pub value: LegendValue,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<GraphType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl LegendLine {
    /// Row for a dataset with nothing at or before the crosshair
    pub fn placeholder(dataset: &Dataset, dataset_index: usize) -> Self {
        Self {
            label: dataset.label.clone(),
            color: dataset.color().unwrap_or_default().to_string(),
            hidden: dataset.hidden,
            dataset_index,
            value: LegendValue::Empty,
            kind: None,
            coordinate: None,
        }
    }

    /// Row for the active point of a dataset
    pub fn for_point(point: &ChartPoint, dataset: &Dataset, dataset_index: usize) -> Self {
        let (label, color, coordinate) = match point {
            ChartPoint::Speed(p) => (
                p.status.code().to_string(),
                p.status.color().to_string(),
                p.located(),
            ),
            ChartPoint::Temperature(p) => (
                p.label.clone(),
                dataset.color().unwrap_or_default().to_string(),
                None,
            ),
        };
        Self {
            label,
            color,
            hidden: dataset.hidden,
            dataset_index,
            value: LegendValue::Number(point.y()),
            kind: Some(point.graph_type()),
            coordinate,
        }
    }

    pub fn is_speed(&self) -> bool {
        self.kind == Some(GraphType::Speed)
    }
}

/// Last point at or before `t`.
///
/// `None` when the first point is already past `t` or `data` is empty.
pub fn active_point(data: &[ChartPoint], t: i64) -> Option<&ChartPoint> {
    match data.iter().position(|p| p.x() > t) {
        Some(0) => None,
        Some(next) => data.get(next - 1),
        None => data.last(),
    }
}
