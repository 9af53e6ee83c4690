#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use brrtdispatch::{ErrorKind, Router, SharedRouter};
use common::fixtures::pet_store;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn test_concurrent_readers_of_published_table() {
    let shared = Arc::new(SharedRouter::new(pet_store()));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for n in 0..500 {
                    let id = format!("{i}-{n}");
                    let (handler, params) = shared.select(&format!("/pets/{id}"), "GET").unwrap();
                    assert_eq!(handler, "get_pet");
                    assert_eq!(params.get("id"), Some(id.as_str()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_modify_while_reading() {
    let shared = Arc::new(SharedRouter::new(pet_store()));
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                while !done.load(Ordering::Acquire) {
                    // existing routes stay resolvable across every swap
                    let (handler, _) = shared.select("/pets/1", "GET").unwrap();
                    assert_eq!(handler, "get_pet");
                }
            })
        })
        .collect();

    for i in 0..20 {
        shared.modify(|router| {
            router.register(&format!("/feeds/{i}"), "GET", "feed");
        });
    }
    done.store(true, Ordering::Release);
    for reader in readers {
        reader.join().unwrap();
    }

    let current = shared.load();
    assert_eq!(current.len(), pet_store().len() + 20);
    assert_eq!(shared.select("/feeds/19", "GET").unwrap().0, "feed");
}

#[test]
fn test_snapshot_is_unaffected_by_publish() {
    let shared = SharedRouter::new(pet_store());
    let before = shared.load();

    let mut replacement = Router::new();
    replacement.route("/v2/pets/:id").get("get_pet_v2");
    shared.publish(replacement);

    assert_eq!(*before.select("/pets/1", "GET").unwrap().handler, "get_pet");
    assert_eq!(
        shared.select("/pets/1", "GET").unwrap_err().kind(),
        ErrorKind::RouteNotRegistered
    );
    assert_eq!(shared.select("/v2/pets/1", "GET").unwrap().0, "get_pet_v2");
}

#[test]
fn test_registration_behind_external_rwlock() {
    let router = Arc::new(RwLock::new(Router::new()));
    let barrier = Arc::new(Barrier::new(5));

    // registration phase
    {
        let mut table = router.write();
        table.route("/jobs/:id").get(1_u32).delete(2);
        table.route("/jobs/active").get(3);
    }

    // resolution phase
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let router = Arc::clone(&router);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let table = router.read();
                assert_eq!(*table.select("/jobs/active", "GET").unwrap().handler, 3);
                assert_eq!(*table.select("/jobs/9", "DELETE").unwrap().handler, 2);
            })
        })
        .collect();
    barrier.wait();

    for handle in handles {
        handle.join().unwrap();
    }

    // a later registration phase is visible to the next readers
    router.write().route("/jobs/:id").put(4);
    assert_eq!(*router.read().select("/jobs/9", "PUT").unwrap().handler, 4);
}
