use crate::bus::EventBus;
use crate::name::EventName;
use crate::subscriber::Subscriber;

/// Keeps a subscriber registered until the guard is dropped.
///
/// Returned by [`EventBus::subscribe_scoped`]; suited to components that
/// subscribe on mount and must release everything on unmount.
#[must_use = "Dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription<P> {
    bus: EventBus<P>,
    name: EventName,
    subscriber: Subscriber<P>,
    active: bool,
}

impl<P> Subscription<P> {
    /// An inactive guard never unsubscribes; it stands for a pair that was
    /// registered before the guard existed.
    pub(crate) const fn new(
        bus: EventBus<P>,
        name: EventName,
        subscriber: Subscriber<P>,
        active: bool,
    ) -> Self {
        Self { bus, name, subscriber, active }
    }

    #[must_use]
    pub const fn name(&self) -> &EventName {
        &self.name
    }

    #[must_use]
    pub const fn subscriber(&self) -> &Subscriber<P> {
        &self.subscriber
    }

    /// Unsubscribes now; returns whether the pair was still registered.
    pub fn cancel(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.bus.unsubscribe(self.name.as_str(), &self.subscriber)
    }
}

impl<P> Drop for Subscription<P> {
    fn drop(&mut self) {
        self.release();
    }
}
