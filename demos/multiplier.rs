//! Multiplication expressed as a Petri net, fired concurrently.
//!
//! Exercises the engine as a black-box consumer: own CLI parsing, own
//! thread construction, public API only. Out of scope for the engine
//! itself per the crate's top-level docs.
//!
//! Usage: `multiplier [A] [B]` (defaults to 2 3).

use std::sync::Arc;
use std::thread;

use petri_nets::{Net, Transition, TransitionBuilder};

fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let a: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(2);
    let b: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(3);

    let net = Arc::new(Net::new(
        petri_nets::Marking::from_pairs([("A", a)]),
        false,
    ));

    // Moves one "A" unit into B tokens' worth of "R".
    let next_outer: Transition<&str> = TransitionBuilder::new()
        .input("A", 1)
        .output("R", b)
        .name("next_outer")
        .build();
    // Drains one "R" token into the product, one at a time.
    let add_one: Transition<&str> = TransitionBuilder::new()
        .input("R", 1)
        .output("Product", 1)
        .name("add_one")
        .build();
    // Enabled only once both "A" and "R" are fully drained.
    let finish: Transition<&str> = TransitionBuilder::new()
        .inhibitor("A")
        .inhibitor("R")
        .output("Done", 1)
        .name("finish")
        .build();

    let non_terminal = [next_outer.clone(), add_one.clone()];

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let net = Arc::clone(&net);
            let non_terminal = non_terminal.clone();
            thread::Builder::new()
                .name(format!("multiplier-worker-{id}"))
                .spawn(move || loop {
                    let refs: Vec<&Transition<&str>> = non_terminal.iter().collect();
                    net.fire_timeout(refs, std::time::Duration::from_millis(200))
                        .ok();
                })
                .expect("failed to spawn worker thread")
        })
        .collect();

    let fired = net.fire([&finish]);
    println!("terminal transition fired: {fired}");
    println!("A={a} B={b} Product={}", net.marking().get(&"Product"));

    // Workers block forever on a never-re-enabled transition set once
    // `finish` has drained A and R; the process exits without joining them.
    drop(workers);
}
