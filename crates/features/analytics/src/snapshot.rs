use dash_kernel::domain::events::AppEvent;
use dash_kernel::domain::model::Theme;
use serde::Serialize;

/// Counters shown on the analytics panel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsSnapshot {
    pub user_count: usize,
    /// Creations and updates since the last refresh.
    pub user_activity: usize,
    pub theme: Theme,
}

impl AnalyticsSnapshot {
    #[must_use]
    pub const fn new(user_count: usize, theme: Theme) -> Self {
        Self { user_count, user_activity: 0, theme }
    }

    /// Folds one event into the counters; unrelated events are ignored.
    pub const fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::UserCreated { .. } => {
                self.user_count += 1;
                self.user_activity += 1;
            },
            AppEvent::UserUpdated { .. } => self.user_activity += 1,
            AppEvent::UserDeleted { .. } => self.user_count = self.user_count.saturating_sub(1),
            AppEvent::DataRefresh => self.user_activity = 0,
            AppEvent::ThemeChanged { theme } => self.theme = *theme,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_kernel::domain::model::{Severity, User};

    #[test]
    fn deletions_never_go_negative() {
        let mut snapshot = AnalyticsSnapshot::default();
        snapshot.apply(&AppEvent::UserDeleted { user_id: "1".into() });
        assert_eq!(snapshot.user_count, 0);
    }

    #[test]
    fn refresh_resets_activity_only() {
        let mut snapshot = AnalyticsSnapshot::new(2, Theme::Light);
        let user = User::new("3", "Ann", "ann@example.com");
        snapshot.apply(&AppEvent::UserCreated { user: user.clone() });
        snapshot.apply(&AppEvent::UserUpdated { user });
        assert_eq!((snapshot.user_count, snapshot.user_activity), (3, 2));

        snapshot.apply(&AppEvent::DataRefresh);
        assert_eq!((snapshot.user_count, snapshot.user_activity), (3, 0));
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut snapshot = AnalyticsSnapshot::new(1, Theme::Dark);
        snapshot.apply(&AppEvent::notify("hi", Severity::Info));
        assert_eq!(snapshot, AnalyticsSnapshot::new(1, Theme::Dark));
    }
}
