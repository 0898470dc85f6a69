use std::sync::atomic::{AtomicUsize, Ordering};

#[dash_derive::dash_module]
pub struct Counter {
    label: &'static str,
    hits: AtomicUsize,
}

impl Counter {
    pub fn new(label: &'static str) -> Self {
        Self::from_inner(CounterInner { label, hits: AtomicUsize::new(0) })
    }
}

fn main() {
    let counter = Counter::new("clicks");
    let clone = counter.clone();
    clone.hits.fetch_add(1, Ordering::SeqCst);
    assert_eq!(counter.hits.load(Ordering::SeqCst), 1);
    assert_eq!(counter.label, "clicks");
}
