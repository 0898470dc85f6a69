use crate::subscriber::HandlerError;
use std::borrow::Cow;

/// Errors that can occur during event bus operations.
///
/// Only [`EventBusError::InvalidEventName`] ever reaches a caller. The subscriber
/// variants are produced while dispatching and go to the
/// [`DiagnosticSink`](crate::DiagnosticSink) instead of the emitter.
#[dash_derive::dash_error]
pub enum EventBusError {
    /// Event names must be non-empty.
    #[error("Invalid event name{}: {message}", format_context(.context))]
    InvalidEventName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A subscriber returned an error while handling an event.
    #[error("Subscriber failed{}: {source}", format_context(.context))]
    SubscriberFailed { source: HandlerError, context: Option<Cow<'static, str>> },

    /// A subscriber panicked while handling an event.
    #[error("Subscriber panicked{}: {message}", format_context(.context))]
    SubscriberPanicked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
