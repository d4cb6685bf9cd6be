//! Signed-in user and their display preferences

use chrono::{FixedOffset, Offset, Utc};
use leptos::prelude::*;
use route_charts::AuthCollaborator;
use route_core::{AppConfig, Timezone, User};

#[derive(Clone)]
pub struct SessionState {
    pub current_user: ArcRwSignal<Option<User>>,
    config: AppConfig,
}

impl SessionState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            current_user: ArcRwSignal::new(None),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sign_in(&self, user: User) {
        tracing::info!(user = %user.id(), "signed in");
        self.current_user.set(Some(user));
    }

    pub fn sign_out(&self) {
        self.current_user.set(None);
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user.with_untracked(Option::is_some)
    }
}

impl AuthCollaborator for SessionState {
    fn date_format(&self) -> Option<String> {
        let preferred = self
            .current_user
            .with_untracked(|user| user.as_ref().and_then(|u| u.date_format().map(str::to_string)));
        preferred.or_else(|| Some(self.config.default_date_format.clone()))
    }

    fn utc_offset(&self) -> FixedOffset {
        self.current_user
            .with_untracked(|user| user.as_ref().and_then(|u| u.timezone().and_then(Timezone::offset)))
            .unwrap_or_else(|| Utc.fix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_core::UserAttributes;

    fn user(date_format: Option<&str>, offset_minutes: i32) -> User {
        let attrs = UserAttributes {
            id: "u-1".into(),
            date_format: date_format.map(str::to_string),
            timezone: Some(Timezone {
                name: "Test/Zone".into(),
                utc_offset_minutes: offset_minutes,
            }),
            ..Default::default()
        };
        User::new(attrs, "https://files.test/")
    }

    #[test]
    fn test_defaults_without_user() {
        let session = SessionState::new(AppConfig::default());
        assert!(!session.is_signed_in());
        assert_eq!(session.date_format(), Some(AppConfig::default().default_date_format));
        assert_eq!(session.utc_offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_user_preferences() {
        let session = SessionState::new(AppConfig::default());
        session.sign_in(user(Some("%Y-%m-%d"), -300));

        assert_eq!(session.date_format().as_deref(), Some("%Y-%m-%d"));
        assert_eq!(session.utc_offset().local_minus_utc(), -300 * 60);

        session.sign_out();
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_user_without_format_falls_back_to_config() {
        let session = SessionState::new(AppConfig {
            default_date_format: "%m/%d/%Y".into(),
            ..Default::default()
        });
        session.sign_in(user(None, 0));
        assert_eq!(session.date_format().as_deref(), Some("%m/%d/%Y"));
    }
}
