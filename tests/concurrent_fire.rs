//! Multi-threaded integration tests for the blocking `fire` family.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use petri_nets::{Marking, Net, TransitionBuilder};

#[test]
fn inhibitor_blocks_until_drained_by_another_thread() {
    let net = Arc::new(Net::new(
        Marking::from_pairs([("p1", 1), ("p2", 1)]),
        false,
    ));

    let blocked = TransitionBuilder::new().input("p1", 1).inhibitor("p2").build();
    let drain = TransitionBuilder::new().input("p2", 1).build();

    let waiter_net = Arc::clone(&net);
    let waiter = thread::spawn(move || {
        waiter_net.fire([&blocked]);
    });

    // Give the waiter a moment to actually block before draining p2.
    thread::sleep(Duration::from_millis(50));
    net.fire([&drain]);

    join_with_timeout(waiter, Duration::from_secs(2))
        .expect("the blocked fire should unblock once p2 is drained");
}

#[test]
fn cancellation_leaves_marking_untouched_and_does_not_fire() {
    let net = Arc::new(Net::new(Marking::new(), false));
    let never_enabled = TransitionBuilder::new().input("absent", 1).build();
    let cancel = Arc::new(AtomicBool::new(false));

    let waiter_net = Arc::clone(&net);
    let waiter_cancel = Arc::clone(&cancel);
    let waiter = thread::spawn(move || waiter_net.fire_cancellable([&never_enabled], &waiter_cancel));

    thread::sleep(Duration::from_millis(50));
    cancel.store(true, Ordering::Release);

    let result = join_with_timeout(waiter, Duration::from_secs(2))
        .expect("wait should resolve after cancellation");
    assert_eq!(result, Err(petri_nets::Error::Cancelled));
    assert!(net.marking().is_empty());
}

#[test]
fn four_workers_fire_the_multiplier_to_completion() {
    let net = Arc::new(Net::new(Marking::from_pairs([("A", 2)]), false));
    let next_outer = TransitionBuilder::new().input("A", 1).output("R", 3).build();
    let add_one = TransitionBuilder::new().input("R", 1).output("Product", 1).build();
    let finish = TransitionBuilder::new().inhibitor("A").inhibitor("R").build();

    let stop = Arc::new(AtomicBool::new(false));
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let net = Arc::clone(&net);
            let next_outer = next_outer.clone();
            let add_one = add_one.clone();
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Acquire) {
                    let _ = net.fire_timeout([&next_outer, &add_one], Duration::from_millis(50));
                }
            })
        })
        .collect();

    net.fire_timeout([&finish], Duration::from_secs(5))
        .expect("multiplier should reach its terminal marking within 5 seconds");
    stop.store(true, Ordering::Release);

    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    assert_eq!(net.marking().get(&"Product"), 6);
}

/// Joins `handle` from a forwarding thread so the caller can bound the
/// wait, instead of calling `JoinHandle::join` (which has no timeout) on
/// the test thread directly. Exists so a regression that makes `fire`
/// block forever fails the test with a message rather than hanging the
/// whole suite.
fn join_with_timeout<T: Send + 'static>(
    handle: thread::JoinHandle<T>,
    timeout: Duration,
) -> Result<T, String> {
    let (tx, rx) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(handle.join());
    });
    match rx.recv_timeout(timeout) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(_)) => Err("thread panicked".to_string()),
        Err(_) => Err("timed out waiting for thread".to_string()),
    }
}
