//! Three-way alternation / mutual-exclusion protocol expressed as a Petri
//! net, driven by three worker threads.
//!
//! Exercises the engine as a black-box consumer: own CLI parsing, own
//! thread construction, public API only. Out of scope for the engine
//! itself per the crate's top-level docs.
//!
//! Usage: `alternator [cycles-per-worker]` (defaults to 3).

use std::sync::Arc;
use std::thread;

use petri_nets::{Marking, Net, Transition, TransitionBuilder};

const NAMES: [&str; 3] = ["A", "B", "C"];
const PAST: [&str; 3] = ["PA", "PB", "PC"];

fn build_pair(i: usize) -> (Transition<&'static str>, Transition<&'static str>) {
    let x = NAMES[i];
    let px = PAST[i];
    let py = PAST[(i + 1) % 3];
    let pz = PAST[(i + 2) % 3];

    let enter = TransitionBuilder::new()
        .inhibitor("A")
        .inhibitor("B")
        .inhibitor("C")
        .inhibitor(px)
        .reset(py)
        .reset(pz)
        .output(x, 1)
        .name(format!("enter_{x}"))
        .build();

    let exit = TransitionBuilder::new()
        .input(x, 1)
        .inhibitor(px)
        .output(px, 1)
        .name(format!("exit_{x}"))
        .build();

    (enter, exit)
}

fn main() {
    tracing_subscriber::fmt::init();

    let cycles: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3);

    let net = Arc::new(Net::new(Marking::new(), true));

    let workers: Vec<_> = (0..3)
        .map(|i| {
            let net = Arc::clone(&net);
            let (enter, exit) = build_pair(i);
            thread::Builder::new()
                .name(format!("alternator-worker-{}", NAMES[i]))
                .spawn(move || {
                    for cycle in 0..cycles {
                        net.fire([&enter]);
                        println!("{} entered (cycle {cycle})", NAMES[i]);
                        net.fire([&exit]);
                        println!("{} exited (cycle {cycle})", NAMES[i]);
                    }
                })
                .expect("failed to spawn worker thread")
        })
        .collect();

    for worker in workers {
        worker.join().expect("worker thread panicked");
    }

    println!("final marking is empty: {}", net.marking().is_empty());
}
