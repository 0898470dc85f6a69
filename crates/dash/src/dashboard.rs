use crate::activity::ActivityLog;
use crate::error::{DashError, DashErrorExt};
use crate::theme::ThemeProvider;
use dash_analytics::{Analytics, AnalyticsSnapshot};
use dash_domain::config::DashboardConfig;
use dash_domain::modules::ModuleSet;
use dash_event_bus::{DiagnosticSink, EventBus, TracingSink};
use dash_kernel::prelude::*;
use dash_notifications::NotificationCenter;
use dash_users::UserDirectory;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Configures a [`Dashboard`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct DashboardBuilder {
    config: DashboardConfig,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl DashboardBuilder {
    pub fn config(mut self, config: DashboardConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the default `tracing` sink for subscriber failures.
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Creates the bus and every configured module. Nothing is mounted yet.
    pub fn build(self) -> Dashboard {
        let Self { config, sink } = self;
        let bus: AppBus =
            EventBus::builder().shared_sink(sink.unwrap_or_else(|| Arc::new(TracingSink))).build();

        let modules = config.modules;
        let users = modules
            .contains(ModuleSet::USERS)
            .then(|| UserDirectory::new(bus.clone(), config.users.seed.clone()));
        let analytics = modules.contains(ModuleSet::ANALYTICS).then(|| {
            Analytics::new(bus.clone(), AnalyticsSnapshot::new(config.users.seed.len(), config.theme))
        });
        let notifications = modules.contains(ModuleSet::NOTIFICATIONS).then(|| {
            NotificationCenter::new(bus.clone(), config.notifications.dismiss_after())
        });

        Dashboard {
            theme: ThemeProvider::new(bus.clone(), config.theme),
            activity: ActivityLog::new(),
            view: RwLock::new(View::default()),
            bus,
            config,
            users,
            analytics,
            notifications,
        }
    }
}

/// The composition root: owns the bus and hands clones of it to every module.
#[derive(Debug)]
pub struct Dashboard {
    bus: AppBus,
    config: DashboardConfig,
    theme: ThemeProvider,
    activity: ActivityLog,
    view: RwLock<View>,
    users: Option<UserDirectory>,
    analytics: Option<Analytics>,
    notifications: Option<NotificationCenter>,
}

/// Point-in-time view of the dashboard, for logging or display.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub view: View,
    pub theme: Theme,
    pub mounted: Vec<&'static str>,
    pub users: Option<usize>,
    pub analytics: Option<AnalyticsSnapshot>,
    pub notifications: Option<usize>,
    pub recent_activity: Vec<String>,
    pub event_names: Vec<String>,
}

impl Dashboard {
    pub fn builder() -> DashboardBuilder {
        DashboardBuilder::default()
    }

    #[must_use]
    pub const fn bus(&self) -> &AppBus {
        &self.bus
    }

    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub const fn theme(&self) -> &ThemeProvider {
        &self.theme
    }

    #[must_use]
    pub const fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    #[must_use]
    pub const fn users(&self) -> Option<&UserDirectory> {
        self.users.as_ref()
    }

    #[must_use]
    pub const fn analytics(&self) -> Option<&Analytics> {
        self.analytics.as_ref()
    }

    #[must_use]
    pub const fn notifications(&self) -> Option<&NotificationCenter> {
        self.notifications.as_ref()
    }

    /// Every module in mount order, configured or not mounted alike.
    #[must_use]
    pub fn modules(&self) -> Vec<&dyn Module> {
        let mut modules: Vec<&dyn Module> = vec![&self.activity];
        if let Some(users) = &self.users {
            modules.push(users);
        }
        if let Some(analytics) = &self.analytics {
            modules.push(analytics);
        }
        if let Some(notifications) = &self.notifications {
            modules.push(notifications);
        }
        modules
    }

    /// Mounts every module. Already mounted modules are left alone.
    ///
    /// # Errors
    /// Returns [`DashError::Module`] naming the first module that failed; the
    /// ones mounted before it stay mounted.
    pub fn mount(&self) -> Result<(), DashError> {
        for module in self.modules() {
            module.mount(&self.bus).map_err(DashError::from).context(module.name())?;
        }
        info!(buckets = self.bus.len(), "Dashboard mounted");
        Ok(())
    }

    /// Unmounts every module; returns how many buckets were left behind,
    /// which is zero unless something outside the modules subscribed.
    pub fn unmount(&self) -> usize {
        for module in self.modules().into_iter().rev() {
            module.unmount();
        }
        let leftover = self.bus.len();
        if leftover > 0 {
            warn!(leftover, names = ?self.bus.event_names(), "Subscriptions outlived their modules");
        } else {
            info!("Dashboard unmounted");
        }
        leftover
    }

    #[must_use]
    pub fn current_view(&self) -> View {
        *self.view.read()
    }

    /// Switches the visible section and emits `navigation.change`.
    pub fn navigate(&self, view: View) -> DeliveryReport {
        *self.view.write() = view;
        self.bus.publish(&AppEvent::NavigationChange { view })
    }

    #[must_use]
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            view: self.current_view(),
            theme: self.theme.current(),
            mounted: self.modules().iter().filter(|m| m.is_mounted()).map(|m| m.name()).collect(),
            users: self.users.as_ref().map(UserDirectory::len),
            analytics: self.analytics.as_ref().map(Analytics::snapshot),
            notifications: self.notifications.as_ref().map(NotificationCenter::len),
            recent_activity: self.activity.recent(),
            event_names: self.bus.event_names().iter().map(ToString::to_string).collect(),
        }
    }
}
