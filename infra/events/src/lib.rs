//! # Event Bus
//!
//! A synchronous, thread-safe dispatcher that lets independently built modules
//! talk to each other by event name.
//!
//! ## Overview
//!
//! Subscribers register under an event name (`user.created`) or under a parent
//! wildcard pattern (`user.*`). [`EventBus::emit`] delivers to the exact bucket
//! first, then to the one-level parent wildcard derived from the emitted name.
//!
//! ## Guarantees
//!
//! * **Identity**: subscribers are compared by reference; subscribing twice is a no-op.
//! * **Bounded state**: a bucket disappears as soon as its last subscriber leaves.
//! * **Snapshot delivery**: each bucket is copied before any subscriber runs, so
//!   mutation during delivery only affects later emits.
//! * **Fault isolation**: an error or panic in one subscriber is reported to the
//!   [`DiagnosticSink`] and never reaches the emitter or sibling subscribers.
//!
//! # Example
//!
//! ```rust
//! use dash_event_bus::{EventBus, EventBusError, Subscriber};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::<String>::new();
//!     let seen = Arc::new(AtomicUsize::new(0));
//!
//!     let counter = Arc::clone(&seen);
//!     let logger = Subscriber::infallible(move |_: &String| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     });
//!
//!     bus.subscribe("user.*", &logger)?;
//!     bus.emit("user.created", &"Ann".to_owned());
//!     bus.emit("admin.created", &"Bob".to_owned());
//!     assert_eq!(seen.load(Ordering::SeqCst), 1);
//!
//!     bus.unsubscribe("user.*", &logger);
//!     assert!(bus.is_empty());
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod name;
mod sink;
mod subscriber;
mod subscription;

pub use bus::{DeliveryReport, EventBus, EventBusBuilder};
pub use error::{EventBusError, EventBusErrorExt};
pub use name::{EventName, SEPARATOR, WILDCARD, wildcard_for};
pub use sink::{DiagnosticSink, SubscriberFailure, TracingSink};
pub use subscriber::{HandlerError, HandlerResult, Subscriber};
pub use subscription::Subscription;
