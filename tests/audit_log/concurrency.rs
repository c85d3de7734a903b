//! Concurrency Tests
//!
//! Appends to one key are linearized; readers see consistent prefixes.

use crate::*;
use auditlog::prelude::*;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

#[test]
fn test_concurrent_appends_same_key() {
    let store = create_store();
    let key = dashboard("hot");
    let writers = 8;
    let per_writer = 100;
    let barrier = Arc::new(Barrier::new(writers));

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let store = Arc::clone(&store);
            let key = key.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let ctx = Context::background();
                barrier.wait();
                for i in 0..per_writer {
                    let value = format!("{}:{}", w, i);
                    store.add_log_entry(&ctx, &key, value.as_bytes(), day(1)).unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let ctx = Context::background();
    assert_eq!(store.log_len(&ctx, &key).unwrap(), writers * per_writer);

    // Each writer's own appends stay in the order it made them
    let mut next = vec![0usize; writers];
    for value in visit_values(store.as_ref(), &key, FindOptions::new()) {
        let (w, i) = value.split_once(':').unwrap();
        let (w, i): (usize, usize) = (w.parse().unwrap(), i.parse().unwrap());
        assert_eq!(i, next[w], "writer {} out of order", w);
        next[w] += 1;
    }
    assert!(next.iter().all(|&n| n == per_writer));
}

#[test]
fn test_concurrent_appends_different_keys() {
    let store = create_store();
    let writers = 8;
    let barrier = Arc::new(Barrier::new(writers));

    let handles: Vec<_> = (0..writers)
        .map(|w| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let ctx = Context::background();
                let key = dashboard(&w.to_string());
                barrier.wait();
                for i in 0..50u32 {
                    store
                        .add_log_entry(&ctx, &key, i.to_string().as_bytes(), day(1 + i % 28))
                        .unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(store.key_count(), writers);
    assert_eq!(store.total_entries(), writers * 50);
    let ctx = Context::background();
    for w in 0..writers {
        let key = dashboard(&w.to_string());
        assert_eq!(store.first_log_entry(&ctx, &key).unwrap().value, b"0");
        assert_eq!(store.last_log_entry(&ctx, &key).unwrap().value, b"49");
    }
}

#[test]
fn test_readers_see_growing_prefixes() {
    let store = create_store();
    let key = dashboard("live");
    let total = 500;

    let writer = {
        let store = Arc::clone(&store);
        let key = key.clone();
        thread::spawn(move || {
            let ctx = Context::background();
            for i in 0..total {
                store
                    .add_log_entry(&ctx, &key, format!("{:04}", i).as_bytes(), day(1))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let key = key.clone();
            thread::spawn(move || {
                let mut last_len = 0;
                for _ in 0..200 {
                    let values = visit_values(store.as_ref(), &key, FindOptions::new());
                    assert!(values.len() >= last_len);
                    for (i, v) in values.iter().enumerate() {
                        assert_eq!(v, &format!("{:04}", i));
                    }
                    last_len = values.len();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }

    assert_eq!(store.log_len(&Context::background(), &key).unwrap(), total);
}

#[test]
fn test_shared_facade_across_threads() {
    let (audit, _) = create_audit(create_store());
    let audit = Arc::new(audit);
    let barrier = Arc::new(Barrier::new(4));

    let handles: Vec<_> = (0..4u64)
        .map(|t| {
            let audit = Arc::clone(&audit);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let ctx = audit.context();
                let id = ResourceId::from_u64(t);
                barrier.wait();
                for _ in 0..25 {
                    audit.record_event(&ctx, &ResourceType::Tasks, &id, "run").unwrap();
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let ctx = audit.context();
    for t in 0..4u64 {
        let id = ResourceId::from_u64(t);
        assert_eq!(audit.event_count(&ctx, &ResourceType::Tasks, &id).unwrap(), 25);
    }
}
