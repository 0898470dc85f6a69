use crate::model::{Theme, User};
use crate::modules::ModuleSet;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Everything the host reads at startup.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfigInner {
    pub log: LogSettings,
    pub modules: ModuleSet,
    pub theme: Theme,
    pub notifications: NotificationSettings,
    pub users: UserSettings,
}

/// Arc-wrapped config, cheap to clone into every module.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(flatten, default)]
    inner: Arc<DashboardConfigInner>,
}

impl Deref for DashboardConfig {
    type Target = DashboardConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for DashboardConfig {
    fn deref_mut(&mut self) -> &mut DashboardConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Application name; prefixes rolling log files.
    pub name: String,
    pub level: String,
    /// Per-target directives, e.g. `dash_event_bus=trace`.
    pub directives: Option<String>,
    pub console: bool,
    /// Directory for rolling log files; console only when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub dismiss_after_secs: u64,
}

impl NotificationSettings {
    #[must_use]
    pub const fn dismiss_after(&self) -> Duration {
        Duration::from_secs(self.dismiss_after_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Users present before anyone creates one.
    pub seed: Vec<User>,
}

// --- Default ---

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            name: "dashboard".to_owned(),
            level: "info".to_owned(),
            directives: None,
            console: true,
            path: None,
            json: false,
        }
    }
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { dismiss_after_secs: 5 }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            seed: vec![
                User::new("1", "John Doe", "john@example.com"),
                User::new("2", "Jane Smith", "jane@example.com"),
            ],
        }
    }
}
