use crate::error::EventBusError;
use crate::name::EventName;
use std::fmt::Debug;
use tracing::error;

/// A subscriber failure captured during dispatch.
#[derive(Debug)]
pub struct SubscriberFailure {
    /// The name passed to `emit`.
    pub event: EventName,
    /// The bucket the failing subscriber was registered under.
    pub bucket: EventName,
    pub error: EventBusError,
}

impl SubscriberFailure {
    /// `true` when the subscriber was reached through the parent wildcard bucket.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.event != self.bucket
    }
}

/// Receives subscriber failures that the bus recovered from.
///
/// Failures never propagate to the emitter; a sink is the only place they
/// surface. Implementations must not call back into the bus that reports to
/// them while holding their own locks.
pub trait DiagnosticSink: Debug + Send + Sync {
    fn report(&self, failure: &SubscriberFailure);
}

/// Default sink: logs every failure at `ERROR` through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, failure: &SubscriberFailure) {
        error!(
            event = %failure.event,
            bucket = %failure.bucket,
            wildcard = failure.is_wildcard(),
            error = %failure.error,
            "Subscriber failed while handling event"
        );
    }
}
