pub mod fixtures;

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use dash_event_bus::*;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bus_with_sink() -> (EventBus<TestEvent>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let bus = EventBus::builder().shared_sink(sink.clone()).build();
        (bus, sink)
    }

    #[test]
    fn test_exact_delivery() {
        let bus = EventBus::new();
        let (subscriber, log) = recorder();
        bus.subscribe("user.created", &subscriber).unwrap();

        let report = bus.emit("user.created", &TestEvent(1));

        assert_eq!(report, DeliveryReport { invoked: 1, failed: 0 });
        assert_eq!(*log.lock(), vec![TestEvent(1)]);
    }

    #[test]
    fn test_subscribe_then_unsubscribe_restores_registry() {
        let bus = EventBus::new();
        let (subscriber, log) = recorder();

        bus.subscribe("user.created", &subscriber).unwrap();
        assert!(bus.unsubscribe("user.created", &subscriber));

        assert!(!bus.has_subscribers("user.created"));
        assert!(bus.event_names().is_empty());
        assert!(bus.emit("user.created", &TestEvent(1)).is_empty());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_duplicate_subscribe_is_idempotent() {
        let bus = EventBus::new();
        let (counter, log) = recorder();

        bus.subscribe("user.created", &counter).unwrap();
        bus.subscribe("user.created", &counter).unwrap();
        bus.subscribe("user.created", &counter.clone()).unwrap();

        assert_eq!(bus.subscriber_count("user.created"), 1);
        bus.emit("user.created", &TestEvent(3));
        assert_eq!(log.lock().len(), 1, "counter must be invoked exactly once");
    }

    #[test]
    fn test_wildcard_matches_immediate_parent_only() {
        let bus = EventBus::new();
        let (users, users_log) = recorder();
        let (everything, everything_log) = recorder();
        let (nested, nested_log) = recorder();

        bus.subscribe("user.*", &users).unwrap();
        bus.subscribe("*", &everything).unwrap();
        bus.subscribe("a.*", &nested).unwrap();

        bus.emit("user.created", &TestEvent(1));
        bus.emit("admin.created", &TestEvent(2));
        bus.emit("a.b.c", &TestEvent(3));

        assert_eq!(*users_log.lock(), vec![TestEvent(1)]);
        assert!(everything_log.lock().is_empty(), "`*` never matches dotted names");
        assert!(nested_log.lock().is_empty(), "`a.*` must not match `a.b.c`");
    }

    #[test]
    fn test_deep_name_reaches_its_own_parent() {
        let bus = EventBus::new();
        let (parent, log) = recorder();
        bus.subscribe("a.b.*", &parent).unwrap();

        bus.emit("a.b.c", &TestEvent(9));

        assert_eq!(*log.lock(), vec![TestEvent(9)]);
    }

    #[test]
    fn test_exact_and_wildcard_are_independent() {
        let bus = EventBus::new();
        let (both, log) = recorder();
        bus.subscribe("user.created", &both).unwrap();
        bus.subscribe("user.*", &both).unwrap();

        let report = bus.emit("user.created", &TestEvent(5));

        assert_eq!(report.invoked, 2);
        assert_eq!(log.lock().len(), 2, "one delivery per bucket, not deduplicated");
    }

    #[test]
    fn test_exact_delivery_precedes_wildcard() {
        let bus = EventBus::new();
        let journal = Arc::new(Mutex::new(Vec::new()));

        bus.subscribe("user.*", &journaled("wildcard", &journal)).unwrap();
        bus.subscribe("user.created", &journaled("exact-1", &journal)).unwrap();
        bus.subscribe("user.created", &journaled("exact-2", &journal)).unwrap();

        bus.emit("user.created", &TestEvent(0));

        assert_eq!(*journal.lock(), vec!["exact-1", "exact-2", "wildcard"]);
    }

    #[test]
    fn test_failing_subscriber_does_not_block_siblings() {
        let (bus, sink) = bus_with_sink();
        let failing = Subscriber::new(|_: &TestEvent| Err("storage offline".into()));
        let (recording, log) = recorder();

        bus.subscribe("user.created", &failing).unwrap();
        bus.subscribe("user.created", &recording).unwrap();

        let report = bus.emit("user.created", &TestEvent(1));

        assert_eq!(report, DeliveryReport { invoked: 2, failed: 1 });
        assert_eq!(*log.lock(), vec![TestEvent(1)]);
        assert_eq!(bus.subscriber_count("user.created"), 2, "failing subscriber stays registered");

        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].event, "user.created");
        assert!(!failures[0].wildcard);
        assert!(failures[0].message.contains("storage offline"));
    }

    #[test]
    fn test_panicking_subscriber_is_contained() {
        let (bus, sink) = bus_with_sink();
        let panicking = Subscriber::infallible(|_: &TestEvent| panic!("render crashed"));
        let (exact, exact_log) = recorder();
        let (wildcard, wildcard_log) = recorder();

        bus.subscribe("notification.show", &panicking).unwrap();
        bus.subscribe("notification.show", &exact).unwrap();
        bus.subscribe("notification.*", &wildcard).unwrap();

        let report = bus.emit("notification.show", &TestEvent(7));

        assert_eq!(report.invoked, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(exact_log.lock().len(), 1);
        assert_eq!(wildcard_log.lock().len(), 1, "later buckets still receive the event");

        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].message.contains("render crashed"));
    }

    #[test]
    fn test_wildcard_failures_are_flagged() {
        let (bus, sink) = bus_with_sink();
        let failing = Subscriber::new(|_: &TestEvent| Err("nope".into()));
        bus.subscribe("user.*", &failing).unwrap();

        bus.emit("user.deleted", &TestEvent(0));

        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].bucket, "user.*");
        assert!(failures[0].wildcard);
    }

    #[test]
    fn test_unsubscribe_unknown_reference_is_noop() {
        let bus = EventBus::new();
        let (registered, _) = recorder();
        let (stranger, _) = recorder();
        bus.subscribe("theme.changed", &registered).unwrap();

        assert!(!bus.unsubscribe("data.refresh", &stranger));
        assert!(!bus.unsubscribe("theme.changed", &stranger));

        assert_eq!(bus.event_names(), vec![EventName::new("theme.changed").unwrap()]);
        assert_eq!(bus.subscriber_count("theme.changed"), 1);
    }

    #[test]
    fn test_emit_without_subscribers_is_noop() {
        let bus = EventBus::<TestEvent>::new();
        let report = bus.emit("data.refresh", &TestEvent(0));
        assert!(report.is_empty());
        assert!(bus.is_empty());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let bus = EventBus::new();
        let (subscriber, _) = recorder();
        let result = bus.subscribe("", &subscriber);
        assert!(matches!(result, Err(EventBusError::InvalidEventName { .. })));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_buckets_do_not_accumulate_under_churn() {
        let bus = EventBus::new();
        for round in 0..500 {
            let (subscriber, _) = recorder();
            let name = format!("module.{}", round % 7);
            bus.subscribe(&name, &subscriber).unwrap();
            bus.subscribe("module.*", &subscriber).unwrap();
            bus.unsubscribe(&name, &subscriber);
            bus.unsubscribe("module.*", &subscriber);
        }
        assert!(bus.is_empty());
        assert_eq!(bus.len(), 0);
    }

    #[test]
    fn test_subscriber_added_during_delivery_misses_current_emit() {
        let bus = EventBus::new();
        let (late, late_log) = recorder();

        let handle = bus.clone();
        let late_handle = late.clone();
        let adder = Subscriber::infallible(move |_: &TestEvent| {
            handle.subscribe("user.created", &late_handle).unwrap();
        });
        bus.subscribe("user.created", &adder).unwrap();

        bus.emit("user.created", &TestEvent(1));
        assert!(late_log.lock().is_empty(), "snapshot taken before the late subscriber existed");

        bus.emit("user.created", &TestEvent(2));
        assert_eq!(*late_log.lock(), vec![TestEvent(2)]);
    }

    #[test]
    fn test_subscriber_removed_during_delivery_still_gets_current_emit() {
        let bus = EventBus::new();
        let (victim, victim_log) = recorder();

        let handle = bus.clone();
        let victim_handle = victim.clone();
        let remover = Subscriber::infallible(move |_: &TestEvent| {
            handle.unsubscribe("user.created", &victim_handle);
        });
        bus.subscribe("user.created", &remover).unwrap();
        bus.subscribe("user.created", &victim).unwrap();

        bus.emit("user.created", &TestEvent(1));
        assert_eq!(victim_log.lock().len(), 1, "removal applies to subsequent emits only");

        bus.emit("user.created", &TestEvent(2));
        assert_eq!(victim_log.lock().len(), 1);
    }

    #[test]
    fn test_self_unsubscribe_during_delivery() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Subscriber<TestEvent>>>> = Arc::new(Mutex::new(None));

        let handle = bus.clone();
        let counter = Arc::clone(&hits);
        let me = Arc::clone(&slot);
        let once = Subscriber::infallible(move |_: &TestEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(this) = me.lock().take() {
                handle.unsubscribe("data.refresh", &this);
            }
        });
        *slot.lock() = Some(once.clone());
        bus.subscribe("data.refresh", &once).unwrap();

        bus.emit("data.refresh", &TestEvent(0));
        bus.emit("data.refresh", &TestEvent(0));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_reentrant_emit_from_subscriber() {
        let bus = EventBus::new();
        let (toast, toast_log) = recorder();
        bus.subscribe("notification.show", &toast).unwrap();

        let handle = bus.clone();
        let bridge = Subscriber::infallible(move |event: &TestEvent| {
            handle.emit("notification.show", event);
        });
        bus.subscribe("storage.error", &bridge).unwrap();

        bus.emit("storage.error", &TestEvent(42));

        assert_eq!(*toast_log.lock(), vec![TestEvent(42)]);
    }

    #[test]
    fn test_scoped_subscription_unsubscribes_on_drop() {
        let bus = EventBus::new();
        let (subscriber, log) = recorder();

        {
            let guard = bus.subscribe_scoped("theme.changed", &subscriber).unwrap();
            assert_eq!(guard.name(), &EventName::new("theme.changed").unwrap());
            bus.emit("theme.changed", &TestEvent(1));
        }

        bus.emit("theme.changed", &TestEvent(2));
        assert_eq!(*log.lock(), vec![TestEvent(1)]);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_scoped_subscription_cancel_reports_state() {
        let bus = EventBus::new();
        let (subscriber, _) = recorder();

        let guard = bus.subscribe_scoped("user.updated", &subscriber).unwrap();
        bus.unsubscribe("user.updated", &subscriber);

        assert!(!guard.cancel(), "already removed elsewhere");
        assert!(bus.is_empty());
    }

    #[test]
    fn test_event_names_are_sorted() {
        let bus = EventBus::new();
        let (subscriber, _) = recorder();
        for name in ["user.deleted", "data.refresh", "notification.show"] {
            bus.subscribe(name, &subscriber).unwrap();
        }

        let names: Vec<String> = bus.event_names().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["data.refresh", "notification.show", "user.deleted"]);
    }

    #[test]
    fn test_shutdown_clears_all_buckets() {
        let bus = EventBus::new();
        let (subscriber, log) = recorder();
        bus.subscribe("a", &subscriber).unwrap();
        bus.subscribe("b.*", &subscriber).unwrap();

        assert_eq!(bus.shutdown(), 2);
        assert!(bus.emit("b.c", &TestEvent(0)).is_empty());
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_concurrent_publishers_and_subscribers() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let stable = Subscriber::infallible(move |_: &TestEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        bus.subscribe("user.created", &stable).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                let bus = bus.clone();
                scope.spawn(move || {
                    for i in 0..250 {
                        bus.emit("user.created", &TestEvent(i));
                    }
                });
            }
            let churn = bus.clone();
            scope.spawn(move || {
                for _ in 0..250 {
                    let (transient, _) = recorder();
                    churn.subscribe("user.created", &transient).unwrap();
                    churn.unsubscribe("user.created", &transient);
                }
            });
        });

        assert_eq!(hits.load(Ordering::SeqCst), 1000);
        assert_eq!(bus.subscriber_count("user.created"), 1);
    }
}
