use crate::error::EventBusError;
use crate::name::{EventName, wildcard_for};
use crate::sink::{DiagnosticSink, SubscriberFailure, TracingSink};
use crate::subscriber::Subscriber;
use crate::subscription::Subscription;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Initial number of buckets reserved by [`EventBus::new`].
/// A dashboard with a handful of modules rarely registers more than this.
const DEFAULT_CAPACITY: usize = 32;

type Bucket<P> = Vec<Subscriber<P>>;
type Registry<P> = FxHashMap<EventName, Bucket<P>>;

/// Counters for a single [`EventBus::emit`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Subscriber invocations, successful or not.
    pub invoked: usize,
    /// Invocations that returned an error or panicked.
    pub failed: usize,
}

impl DeliveryReport {
    #[must_use]
    pub const fn succeeded(&self) -> usize {
        self.invoked - self.failed
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.invoked == 0
    }
}

/// A thread-safe, synchronous publish/subscribe dispatcher keyed by event name.
///
/// Cloning is cheap and yields a handle to the same registry, so the
/// composition root can build one bus and hand clones to every module.
///
/// Delivery runs on the caller's stack. The registry lock is only held while a
/// bucket is copied, never while subscribers run, so a subscriber may itself
/// subscribe, unsubscribe or emit.
pub struct EventBus<P> {
    registry: Arc<RwLock<Registry<P>>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<P> EventBus<P> {
    /// Creates an empty bus that reports subscriber failures through `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a bus with a custom diagnostic sink or capacity.
    ///
    /// # Examples
    /// ```rust
    /// use dash_event_bus::{EventBus, TracingSink};
    ///
    /// let bus = EventBus::<String>::builder().sink(TracingSink).capacity(8).build();
    /// assert!(bus.is_empty());
    /// ```
    #[must_use = "The builder does nothing until `build()` is called"]
    pub fn builder() -> EventBusBuilder<P> {
        EventBusBuilder::default()
    }

    /// Registers `subscriber` under `name`, creating the bucket if needed.
    ///
    /// Subscribing the same reference twice under one name is a no-op.
    /// `name` may be an exact name (`user.created`) or a parent wildcard
    /// pattern (`user.*`).
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidEventName`] if `name` is empty.
    ///
    /// # Examples
    /// ```rust
    /// use dash_event_bus::{EventBus, Subscriber};
    ///
    /// # fn main() -> Result<(), dash_event_bus::EventBusError> {
    /// let bus = EventBus::<u32>::new();
    /// let counter = Subscriber::infallible(|n: &u32| assert_eq!(*n, 7));
    /// bus.subscribe("user.created", &counter)?;
    /// bus.subscribe("user.created", &counter)?;
    /// assert_eq!(bus.emit("user.created", &7).invoked, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn subscribe(&self, name: &str, subscriber: &Subscriber<P>) -> Result<(), EventBusError> {
        self.register(name, subscriber).map(drop)
    }

    /// Like [`EventBus::subscribe`], but returns a guard that unsubscribes on drop.
    ///
    /// If the pair was already registered, the returned guard is inert: dropping
    /// it leaves the earlier registration in place.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidEventName`] if `name` is empty.
    pub fn subscribe_scoped(
        &self,
        name: &str,
        subscriber: &Subscriber<P>,
    ) -> Result<Subscription<P>, EventBusError> {
        let (key, added) = self.register(name, subscriber)?;
        Ok(Subscription::new(self.clone(), key, subscriber.clone(), added))
    }

    /// Removes `subscriber` from `name`; drops the bucket once it is empty.
    ///
    /// Unknown names or references are ignored. Returns whether anything was
    /// removed. An emit already in progress keeps delivering to its snapshot.
    pub fn unsubscribe(&self, name: &str, subscriber: &Subscriber<P>) -> bool {
        let mut registry = self.registry.write();
        let Some(bucket) = registry.get_mut(name) else {
            return false;
        };
        let Some(index) = bucket.iter().position(|existing| existing.same_as(subscriber)) else {
            return false;
        };

        bucket.remove(index);
        if bucket.is_empty() {
            registry.remove(name);
            trace!(event = name, "Bucket removed");
        }
        true
    }

    /// Delivers `payload` to every subscriber of `name`, then to every subscriber
    /// of its parent wildcard (`user.created` -> `user.*`).
    ///
    /// Each bucket is copied before any subscriber runs. Subscriber errors and
    /// panics are reported to the diagnostic sink and delivery continues; emit
    /// itself never fails. A subscriber registered under both buckets is
    /// invoked twice; so is a `user.*` subscriber when `user.*` itself is
    /// emitted, since the name is its own parent wildcard.
    pub fn emit(&self, name: &str, payload: &P) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        self.deliver(name, name, payload, &mut report);
        if let Some(pattern) = wildcard_for(name) {
            self.deliver(name, &pattern, payload, &mut report);
        }

        if report.is_empty() {
            trace!(event = name, "Event dropped: no subscribers");
        } else {
            trace!(event = name, invoked = report.invoked, failed = report.failed, "Event dispatched");
        }
        report
    }

    /// `true` if a bucket exists for exactly `name` (patterns are not expanded).
    #[must_use]
    pub fn has_subscribers(&self, name: &str) -> bool {
        self.registry.read().contains_key(name)
    }

    /// Number of subscribers registered under exactly `name`.
    #[must_use]
    pub fn subscriber_count(&self, name: &str) -> usize {
        self.registry.read().get(name).map_or(0, Vec::len)
    }

    /// All names that currently have at least one subscriber, sorted.
    #[must_use]
    pub fn event_names(&self) -> Vec<EventName> {
        let mut names: Vec<EventName> = self.registry.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of live buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.read().is_empty()
    }

    /// Drops every bucket. Returns the number of buckets removed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let removed = {
            let mut registry = self.registry.write();
            let count = registry.len();
            registry.clear();
            count
        };
        debug!(buckets = removed, "Event bus cleared");
        removed
    }

    /// Returns the validated name and whether the pair was newly added.
    fn register(
        &self,
        name: &str,
        subscriber: &Subscriber<P>,
    ) -> Result<(EventName, bool), EventBusError> {
        let key = EventName::new(name)?;
        let mut registry = self.registry.write();

        if let Some(bucket) = registry.get_mut(name) {
            if bucket.iter().any(|existing| existing.same_as(subscriber)) {
                trace!(event = name, "Subscriber already registered");
                return Ok((key, false));
            }
            bucket.push(subscriber.clone());
            trace!(event = name, subscribers = bucket.len(), "Subscriber added");
            return Ok((key, true));
        }

        registry.insert(key.clone(), vec![subscriber.clone()]);
        drop(registry);
        trace!(event = name, "Bucket created");
        Ok((key, true))
    }

    fn snapshot(&self, bucket: &str) -> Option<Bucket<P>> {
        self.registry.read().get(bucket).cloned()
    }

    fn deliver(&self, event: &str, bucket: &str, payload: &P, report: &mut DeliveryReport) {
        let Some(subscribers) = self.snapshot(bucket) else {
            return;
        };

        for subscriber in &subscribers {
            report.invoked += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| subscriber.call(payload)));
            let error = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => EventBusError::SubscriberFailed { source, context: None },
                Err(panic) => EventBusError::SubscriberPanicked {
                    message: panic_message(panic.as_ref()),
                    context: None,
                },
            };
            report.failed += 1;
            self.notify_sink(event, bucket, error);
        }
    }

    fn notify_sink(&self, event: &str, bucket: &str, error: EventBusError) {
        // Both names were matched against the registry, so they are non-empty.
        let (Ok(event), Ok(bucket)) = (EventName::new(event), EventName::new(bucket)) else {
            return;
        };
        let failure = SubscriberFailure { event, bucket, error };
        if let Err(panic) = panic::catch_unwind(AssertUnwindSafe(|| self.sink.report(&failure))) {
            warn!(
                event = %failure.event,
                panic = %panic_message(panic.as_ref()),
                "Diagnostic sink panicked while reporting a subscriber failure"
            );
        }
    }
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for EventBus<P> {
    fn clone(&self) -> Self {
        Self { registry: Arc::clone(&self.registry), sink: Arc::clone(&self.sink) }
    }
}

impl<P> fmt::Debug for EventBus<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("buckets", &self.registry.read().len())
            .field("sink", &self.sink)
            .finish()
    }
}

/// Configures an [`EventBus`] before it is shared.
pub struct EventBusBuilder<P> {
    sink: Option<Arc<dyn DiagnosticSink>>,
    capacity: usize,
    payload: PhantomData<fn(&P)>,
}

impl<P> Default for EventBusBuilder<P> {
    fn default() -> Self {
        Self { sink: None, capacity: DEFAULT_CAPACITY, payload: PhantomData }
    }
}

impl<P> EventBusBuilder<P> {
    /// Sets the sink that receives subscriber failures.
    #[must_use = "The builder does nothing until `build()` is called"]
    pub fn sink(self, sink: impl DiagnosticSink + 'static) -> Self {
        self.shared_sink(Arc::new(sink))
    }

    /// Sets a sink that is also held elsewhere (e.g. inspected by tests).
    #[must_use = "The builder does nothing until `build()` is called"]
    pub fn shared_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Reserves room for `capacity` buckets up front.
    #[must_use = "The builder does nothing until `build()` is called"]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn build(self) -> EventBus<P> {
        let registry = FxHashMap::with_capacity_and_hasher(self.capacity, Default::default());
        EventBus {
            registry: Arc::new(RwLock::new(registry)),
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
        }
    }
}

impl<P> fmt::Debug for EventBusBuilder<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBusBuilder")
            .field("sink", &self.sink)
            .field("capacity", &self.capacity)
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> Cow<'static, str> {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        Cow::Borrowed(*message)
    } else if let Some(message) = panic.downcast_ref::<String>() {
        Cow::Owned(message.clone())
    } else {
        Cow::Borrowed("non-string panic payload")
    }
}
