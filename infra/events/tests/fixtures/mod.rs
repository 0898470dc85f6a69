#![allow(dead_code)]

use dash_event_bus::{DiagnosticSink, EventName, Subscriber, SubscriberFailure};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestEvent(pub usize);

/// Records every payload a subscriber receives.
pub fn recorder() -> (Subscriber<TestEvent>, Arc<Mutex<Vec<TestEvent>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let subscriber = Subscriber::infallible(move |event: &TestEvent| sink.lock().push(event.clone()));
    (subscriber, log)
}

/// Records `label` into a shared journal, to observe delivery order across subscribers.
pub fn journaled(label: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> Subscriber<TestEvent> {
    let journal = Arc::clone(journal);
    Subscriber::infallible(move |_: &TestEvent| journal.lock().push(label))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFailure {
    pub event: EventName,
    pub bucket: EventName,
    pub message: String,
    pub wildcard: bool,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    failures: Mutex<Vec<RecordedFailure>>,
}

impl RecordingSink {
    pub fn failures(&self) -> Vec<RecordedFailure> {
        self.failures.lock().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, failure: &SubscriberFailure) {
        self.failures.lock().push(RecordedFailure {
            event: failure.event.clone(),
            bucket: failure.bucket.clone(),
            message: failure.error.to_string(),
            wildcard: failure.is_wildcard(),
        });
    }
}
