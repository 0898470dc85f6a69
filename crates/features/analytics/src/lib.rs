//! Analytics module.
//!
//! Listens to user, refresh and theme events and keeps a few counters. It has
//! no error type of its own: handlers cannot fail and the only thing it emits
//! is `data.refresh`.

mod snapshot;

pub use crate::snapshot::AnalyticsSnapshot;

use dash_kernel::prelude::*;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Events the counters react to.
const TRACKED: [&str; 5] = [USER_CREATED, USER_UPDATED, USER_DELETED, DATA_REFRESH, THEME_CHANGED];

#[dash_derive::dash_module]
pub struct Analytics {
    bus: AppBus,
    state: Arc<RwLock<AnalyticsSnapshot>>,
    subscriptions: Subscriptions,
}

impl Analytics {
    pub fn new(bus: AppBus, initial: AnalyticsSnapshot) -> Self {
        Self::from_inner(AnalyticsInner {
            bus,
            state: Arc::new(RwLock::new(initial)),
            subscriptions: Subscriptions::new(),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> AnalyticsSnapshot {
        *self.state.read()
    }

    /// Emits `data.refresh`; a mounted instance resets its activity counter.
    pub fn refresh(&self) -> DeliveryReport {
        self.bus.publish(&AppEvent::DataRefresh)
    }
}

impl Module for Analytics {
    fn name(&self) -> &'static str {
        ANALYTICS
    }

    fn mount(&self, bus: &AppBus) -> Result<(), ModuleError> {
        let state = Arc::clone(&self.state);
        let handler = Subscriber::infallible(move |event: &AppEvent| {
            let mut state = state.write();
            state.apply(event);
            debug!(event = event.name(), counters = ?*state, "Analytics updated");
        });

        let bindings = TRACKED.into_iter().map(|name| (name, handler.clone()));
        self.subscriptions.attach(ANALYTICS, bus, bindings).map(|_| ())
    }

    fn unmount(&self) {
        self.subscriptions.detach(ANALYTICS);
    }

    fn is_mounted(&self) -> bool {
        self.subscriptions.is_attached()
    }
}
