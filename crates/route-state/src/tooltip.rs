//! Legend panel shown next to the route charts

use leptos::prelude::*;
use route_charts::{LegendLine, TooltipCollaborator};

#[derive(Clone, Default)]
pub struct TooltipState {
    pub speed_lines: ArcRwSignal<Vec<LegendLine>>,
    pub temp_lines: ArcRwSignal<Vec<LegendLine>>,
    /// Formatted crosshair time
    pub title: ArcRwSignal<Option<String>>,
}

impl TooltipState {
    pub fn clear(&self) {
        self.speed_lines.set(Vec::new());
        self.temp_lines.set(Vec::new());
        self.title.set(None);
    }

    pub fn has_content(&self) -> bool {
        self.speed_lines.with_untracked(|lines| !lines.is_empty())
            || self.temp_lines.with_untracked(|lines| !lines.is_empty())
    }
}

impl TooltipCollaborator for TooltipState {
    fn set_speed_legend_lines(&self, lines: Vec<LegendLine>) {
        self.speed_lines.set(lines);
    }

    fn set_temp_legend_lines(&self, lines: Vec<LegendLine>) {
        self.temp_lines.set(lines);
    }

    fn set_title(&self, title: Option<String>) {
        self.title.set(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_charts::{LegendValue, EMPTY_VALUE};

    fn line(label: &str) -> LegendLine {
        LegendLine {
            label: label.into(),
            color: "#fff".into(),
            hidden: false,
            dataset_index: 0,
            value: LegendValue::Empty,
            kind: None,
            coordinate: None,
        }
    }

    #[test]
    fn test_lines_and_clear() {
        let tooltip = TooltipState::default();
        assert!(!tooltip.has_content());

        tooltip.set_temp_legend_lines(vec![line("Cargo")]);
        assert!(tooltip.has_content());
        assert_eq!(tooltip.temp_lines.get_untracked()[0].value.to_string(), EMPTY_VALUE);

        tooltip.clear();
        assert!(!tooltip.has_content());
        assert_eq!(tooltip.title.get_untracked(), None);
    }
}
