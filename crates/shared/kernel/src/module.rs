//! The mount/unmount contract shared by every dashboard module.

use crate::bus::{AppBus, AppSubscriber};
use dash_domain::events::AppEvent;
use dash_event_bus::{EventBusError, Subscription};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::fmt::Debug;
use tracing::debug;

#[dash_derive::dash_error]
pub enum ModuleError {
    #[error("Event bus error{}: {source}", format_context(.context))]
    Bus { source: EventBusError, context: Option<Cow<'static, str>> },
}

/// A unit of the dashboard that attaches itself to the bus.
///
/// `mount` must be idempotent, and `unmount` must remove every subscription
/// the module made so repeated mount/unmount cycles leave no residue in the
/// registry.
pub trait Module: Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Subscribes the module's handlers. Mounting twice is a no-op.
    ///
    /// # Errors
    /// Returns [`ModuleError::Bus`] if a handler could not be registered; any
    /// handlers registered before the failure are released again.
    fn mount(&self, bus: &AppBus) -> Result<(), ModuleError>;

    /// Releases everything `mount` registered. No-op when not mounted.
    fn unmount(&self);

    fn is_mounted(&self) -> bool;
}

/// Bookkeeping for the subscriptions a module holds while mounted.
///
/// Each binding is kept as a scoped [`Subscription`], so releasing them is
/// just dropping the list.
#[derive(Debug, Default)]
pub struct Subscriptions {
    active: Mutex<Option<Vec<Subscription<AppEvent>>>>,
}

impl Subscriptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every `(name, subscriber)` binding unless already mounted.
    ///
    /// Returns `false` when the bindings were already in place.
    ///
    /// # Errors
    /// Returns [`ModuleError::Bus`] on the first binding the bus rejects.
    pub fn attach<I>(&self, owner: &str, bus: &AppBus, bindings: I) -> Result<bool, ModuleError>
    where
        I: IntoIterator<Item = (&'static str, AppSubscriber)>,
    {
        let mut active = self.active.lock();
        if active.is_some() {
            debug!(module = owner, "Already mounted");
            return Ok(false);
        }

        let guards = bindings
            .into_iter()
            .map(|(name, subscriber)| bus.subscribe_scoped(name, &subscriber))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ModuleError::Bus { source, context: Some(owner.to_owned().into()) })?;

        debug!(module = owner, subscriptions = guards.len(), "Mounted");
        *active = Some(guards);
        Ok(true)
    }

    /// Drops every held subscription; returns how many were released.
    pub fn detach(&self, owner: &str) -> usize {
        let released = self.active.lock().take().map_or(0, |guards| guards.len());
        if released > 0 {
            debug!(module = owner, subscriptions = released, "Unmounted");
        }
        released
    }

    pub fn is_attached(&self) -> bool {
        self.active.lock().is_some()
    }
}
