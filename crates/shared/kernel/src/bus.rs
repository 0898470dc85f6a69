use dash_domain::events::AppEvent;
use dash_event_bus::{DeliveryReport, EventBus, Subscriber};
use tracing::debug;

/// The dashboard bus: every payload is an [`AppEvent`].
pub type AppBus = EventBus<AppEvent>;
pub type AppSubscriber = Subscriber<AppEvent>;

pub trait AppBusExt {
    /// Emits `event` under its own [`AppEvent::name`].
    fn publish(&self, event: &AppEvent) -> DeliveryReport;
}

impl AppBusExt for AppBus {
    fn publish(&self, event: &AppEvent) -> DeliveryReport {
        let report = self.emit(event.name(), event);
        debug!(event = event.name(), invoked = report.invoked, failed = report.failed, "Published");
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_domain::constants::{THEME_CHANGED, USER_ANY};
    use dash_domain::model::{Theme, User};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn publish_routes_by_event_name() {
        let bus = AppBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let recorder = Subscriber::infallible(move |event: &AppEvent| sink.lock().push(event.name()));
        bus.subscribe(USER_ANY, &recorder).unwrap();
        bus.subscribe(THEME_CHANGED, &recorder).unwrap();

        bus.publish(&AppEvent::UserCreated { user: User::new("9", "Ann", "ann@example.com") });
        bus.publish(&AppEvent::ThemeChanged { theme: Theme::Dark });
        let report = bus.publish(&AppEvent::DataRefresh);

        assert!(report.is_empty());
        assert_eq!(*seen.lock(), vec!["user.created", "theme.changed"]);
    }
}
