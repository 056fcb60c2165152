//! Concurrent load tests for `keystone_component`.
//!
//! Registries are call-scoped, so independent loads on separate threads
//! must never share instances or loaded state.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use keystone_component::prelude::*;

static CLOCK_LOADS: AtomicUsize = AtomicUsize::new(0);

#[derive(Default, Component)]
#[component(loadable)]
struct Clock {
    ticks: u64,
}

impl Loadable for Clock {
    fn load(&mut self) -> Result<(), HookError> {
        CLOCK_LOADS.fetch_add(1, Ordering::SeqCst);
        self.ticks += 1;
        Ok(())
    }
}

#[derive(Default, Component)]
#[component(loadable)]
struct Scheduler {
    clock: Shared<Clock>,
    armed: bool,
}

impl Loadable for Scheduler {
    fn load(&mut self) -> Result<(), HookError> {
        let clock = self.clock.read().ok_or("clock missing")?;
        if clock.ticks != 1 {
            return Err("clock loaded more than once".into());
        }
        drop(clock);
        self.armed = true;
        Ok(())
    }
}

#[derive(Default, Component)]
struct Worker {
    clock: Shared<Clock>,
    scheduler: Shared<Scheduler>,
}

/// Test that independent loads on many threads each get their own singletons.
#[test]
fn independent_loads_run_concurrently() {
    const THREADS: usize = 8;
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let mut worker = Worker::default();
                barrier.wait();
                load(&mut worker).expect("load failed");
                worker
            })
        })
        .collect();

    let workers: Vec<Worker> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for worker in &workers {
        assert_eq!(worker.clock.read().unwrap().ticks, 1);
        assert!(worker.scheduler.read().unwrap().armed);
        assert!(worker.clock.ptr_eq(&worker.scheduler.read().unwrap().clock));
    }
    for pair in workers.windows(2) {
        assert!(!pair[0].clock.ptr_eq(&pair[1].clock));
    }
    assert!(CLOCK_LOADS.load(Ordering::SeqCst) >= THREADS);
}

/// Test that a loaded graph can be shared read-only across threads.
#[test]
fn loaded_graph_is_readable_from_other_threads() {
    let mut worker = Worker::default();
    load(&mut worker).unwrap();
    let worker = Arc::new(worker);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let worker = Arc::clone(&worker);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert_eq!(worker.clock.read().unwrap().ticks, 1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
}
