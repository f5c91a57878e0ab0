//! Loom-based concurrency tests for the ownership counter.
//!
//! These tests explore every interleaving of concurrent clones and drops and
//! check that the shared object is destroyed exactly once, after its last
//! owner.
//!
//! Run with: `cargo test -p causeway-internals --features loom --test loom_tests --release`

#![cfg(feature = "loom")]

use causeway_internals::{RefCount, RefPtr, Released};
use loom::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test: Two threads dropping the last two owners destroy the object once
#[test]
fn loom_concurrent_drop_destroys_once() {
    loom::model(|| {
        let drops = Arc::new(AtomicUsize::new(0));
        let first = RefPtr::counted(DropCounter(drops.clone()));
        let second = first.clone();

        let handle = thread::spawn(move || drop(second));
        drop(first);
        handle.join().unwrap();

        assert_eq!(drops.load(Ordering::SeqCst), 1);
    });
}

/// Test: Exactly one concurrent release observes `Released::Last`
#[test]
fn loom_exactly_one_last_release() {
    loom::model(|| {
        let mut first = RefPtr::counted(5_u32);
        let mut second = first.clone();

        let handle = thread::spawn(move || second.release());
        let here = first.release();
        let there = handle.join().unwrap();

        let lasts = [here, there]
            .into_iter()
            .filter(|released| *released == Some(Released::Last))
            .count();
        assert_eq!(lasts, 1);
    });
}

/// Test: Cloning on one thread while another drops keeps the object alive
#[test]
fn loom_clone_while_dropping() {
    loom::model(|| {
        let drops = Arc::new(AtomicUsize::new(0));
        let shared = RefPtr::counted(DropCounter(drops.clone()));
        let worker = shared.clone();

        let handle = thread::spawn(move || {
            let extra = worker.clone();
            drop(worker);
            extra
        });
        drop(shared);
        let survivor = handle.join().unwrap();

        assert_eq!(drops.load(Ordering::SeqCst), 0);
        assert_eq!(survivor.strong_count(), 1);
        drop(survivor);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    });
}

/// Test: The raw counter reaches zero exactly once
#[test]
fn loom_counter_balances() {
    loom::model(|| {
        let count = Arc::new(RefCount::new());
        count.increment();
        count.increment();

        let worker = count.clone();
        let handle = thread::spawn(move || worker.decrement());
        let here = count.decrement();
        let there = handle.join().unwrap();

        assert_eq!(count.get(), 0);
        assert!(here.is_last() ^ there.is_last());
    });
}
