use dash_kernel::prelude::*;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::info;

/// Entries kept by [`ActivityLog`]; older ones are dropped first.
pub const ACTIVITY_CAPACITY: usize = 50;

/// The "recent activity" feed: one line per user event, via the `user.*`
/// wildcard.
#[dash_derive::dash_module]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<String>>>,
    subscriptions: Subscriptions,
}

impl ActivityLog {
    #[must_use]
    pub fn new() -> Self {
        Self::from_inner(ActivityLogInner {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(ACTIVITY_CAPACITY))),
            subscriptions: Subscriptions::new(),
        })
    }

    /// Most recent entries, oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<String> {
        self.entries.lock().iter().cloned().collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Module for ActivityLog {
    fn name(&self) -> &'static str {
        "activity"
    }

    fn mount(&self, bus: &AppBus) -> Result<(), ModuleError> {
        let entries = Arc::clone(&self.entries);
        let recorder = Subscriber::infallible(move |event: &AppEvent| {
            let Some(line) = describe(event) else { return };
            info!(event = event.name(), "{line}");

            let mut entries = entries.lock();
            if entries.len() == ACTIVITY_CAPACITY {
                entries.pop_front();
            }
            entries.push_back(line);
        });

        self.subscriptions.attach(self.name(), bus, [(USER_ANY, recorder)]).map(|_| ())
    }

    fn unmount(&self) {
        self.subscriptions.detach(self.name());
    }

    fn is_mounted(&self) -> bool {
        self.subscriptions.is_attached()
    }
}

fn describe(event: &AppEvent) -> Option<String> {
    Some(match event {
        AppEvent::UserCreated { user } => format!("{} joined ({})", user.name, user.email),
        AppEvent::UserUpdated { user } => format!("{} was updated", user.name),
        AppEvent::UserDeleted { user_id } => format!("user {user_id} was removed"),
        AppEvent::UserSelected { user } => format!("{} was selected", user.name),
        _ => return None,
    })
}
