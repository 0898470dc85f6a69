//! Notifications module.
//!
//! Keeps the list of visible toasts. `notification.show` appends one,
//! `notification.clear` removes one by id (or all of them when no id is
//! given). Expiry is explicit: the host calls
//! [`NotificationCenter::prune_expired`] with the current time, since
//! delivery is synchronous and there is no timer.

use chrono::{DateTime, TimeDelta, Utc};
use dash_kernel::prelude::*;
use dash_kernel::safe_nanoid;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    fn new(message: &str, severity: Severity) -> Self {
        Self {
            id: NotificationId::from(safe_nanoid!()),
            message: message.to_owned(),
            severity,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct Board {
    items: Vec<Notification>,
}

impl Board {
    fn apply(&mut self, event: &AppEvent) {
        match event {
            AppEvent::NotificationShow { message, severity } => {
                let notification = Notification::new(message, *severity);
                trace!(id = %notification.id, "Notification shown");
                self.items.push(notification);
            },
            AppEvent::NotificationClear { notification_id: Some(id) } => {
                self.items.retain(|n| &n.id != id);
            },
            AppEvent::NotificationClear { notification_id: None } => self.items.clear(),
            _ => {}
        }
    }
}

#[dash_derive::dash_module]
pub struct NotificationCenter {
    bus: AppBus,
    board: Arc<RwLock<Board>>,
    dismiss_after: TimeDelta,
    subscriptions: Subscriptions,
}

impl NotificationCenter {
    pub fn new(bus: AppBus, dismiss_after: Duration) -> Self {
        Self::from_inner(NotificationCenterInner {
            bus,
            board: Arc::new(RwLock::new(Board::default())),
            dismiss_after: TimeDelta::from_std(dismiss_after).unwrap_or(TimeDelta::MAX),
            subscriptions: Subscriptions::new(),
        })
    }

    /// Visible notifications, oldest first.
    #[must_use]
    pub fn list(&self) -> Vec<Notification> {
        self.board.read().items.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.board.read().items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.board.read().items.is_empty()
    }

    /// Emits `notification.show`.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> DeliveryReport {
        self.bus.publish(&AppEvent::notify(message, severity))
    }

    /// Emits `notification.clear` for one notification.
    pub fn dismiss(&self, id: &NotificationId) -> DeliveryReport {
        self.bus.publish(&AppEvent::NotificationClear { notification_id: Some(id.clone()) })
    }

    /// Emits `notification.clear` without an id.
    pub fn clear_all(&self) -> DeliveryReport {
        self.bus.publish(&AppEvent::NotificationClear { notification_id: None })
    }

    /// Drops notifications shown at least `dismiss_after` before `now`;
    /// returns how many were removed.
    pub fn prune_expired(&self, now: DateTime<Utc>) -> usize {
        let mut board = self.board.write();
        let before = board.items.len();
        board.items.retain(|n| now.signed_duration_since(n.created_at) < self.dismiss_after);
        let pruned = before - board.items.len();
        drop(board);

        if pruned > 0 {
            debug!(pruned, "Expired notifications dismissed");
        }
        pruned
    }
}

impl Module for NotificationCenter {
    fn name(&self) -> &'static str {
        NOTIFICATIONS
    }

    fn mount(&self, bus: &AppBus) -> Result<(), ModuleError> {
        let board = Arc::clone(&self.board);
        let handler = Subscriber::infallible(move |event: &AppEvent| board.write().apply(event));

        let bindings = [(NOTIFICATION_SHOW, handler.clone()), (NOTIFICATION_CLEAR, handler)];
        self.subscriptions.attach(NOTIFICATIONS, bus, bindings).map(|_| ())
    }

    fn unmount(&self) {
        self.subscriptions.detach(NOTIFICATIONS);
    }

    fn is_mounted(&self) -> bool {
        self.subscriptions.is_attached()
    }
}
