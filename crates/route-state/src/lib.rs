//! # route-state
//!
//! Reactive UI state shared with the route chart service.
//! Uses Leptos signals so the map, tooltip panel and theme react to chart
//! interaction without holding references to the charts themselves.

pub mod map;
pub mod session;
pub mod tooltip;

pub use map::*;
pub use session::*;
pub use tooltip::*;

use leptos::prelude::{ArcRwSignal, Update, WithUntracked};
use route_charts::{Collaborators, ThemeCollaborator};
use route_core::{colors, AppConfig, Translator};
use std::rc::Rc;

// ============================================================================
// THEME
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub accent_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            accent_color: colors::ACCENT.to_string(),
        }
    }
}

/// Current theme as a signal
#[derive(Clone, Default)]
pub struct ThemeState {
    pub current: ArcRwSignal<Theme>,
}

impl ThemeState {
    pub fn toggle_mode(&self) {
        self.current.update(|theme| theme.mode = theme.mode.toggle());
    }

    pub fn set_accent_color(&self, color: impl Into<String>) {
        let color = color.into();
        self.current.update(|theme| theme.accent_color = color);
    }
}

impl ThemeCollaborator for ThemeState {
    fn accent_color(&self) -> String {
        self.current.with_untracked(|theme| theme.accent_color.clone())
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub theme: ThemeState,
    pub tooltip: TooltipState,
    pub map: MapState,
    pub session: SessionState,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            theme: ThemeState::default(),
            tooltip: TooltipState::default(),
            map: MapState::default(),
            session: SessionState::new(config),
        }
    }

    /// Collaborator handles for the chart service, sharing these signals
    pub fn collaborators(&self, translator: Rc<dyn Translator>) -> Collaborators {
        Collaborators {
            map: Rc::new(self.map.clone()),
            tooltip: Rc::new(self.tooltip.clone()),
            auth: Rc::new(self.session.clone()),
            theme: Rc::new(self.theme.clone()),
            translator,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::prelude::GetUntracked;
    use route_charts::TooltipCollaborator;
    use route_core::EnglishUnits;

    #[test]
    fn test_theme_snapshot_follows_updates() {
        let theme = ThemeState::default();
        assert_eq!(theme.accent_color(), colors::ACCENT);

        theme.set_accent_color("#123456");
        assert_eq!(theme.accent_color(), "#123456");

        theme.toggle_mode();
        assert_eq!(theme.current.get_untracked().mode, ThemeMode::Dark);
    }

    #[test]
    fn test_collaborators_share_signals() {
        let state = AppState::default();
        let collaborators = state.collaborators(Rc::new(EnglishUnits));

        collaborators.tooltip.set_title(Some("now".into()));
        assert_eq!(state.tooltip.title.get_untracked().as_deref(), Some("now"));

        state.theme.set_accent_color("#000");
        assert_eq!(collaborators.theme.accent_color(), "#000");
    }
}
