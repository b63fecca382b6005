//! A generic, concurrent Petri net engine.
//!
//! Four arc kinds (input, output, inhibitor, reset), atomic
//! multi-transition firing under a nondeterministic choice policy,
//! blocking-until-enabled semantics with cooperative cancellation, and an
//! exhaustive reachability enumerator over a caller-supplied transition
//! set. See [`Net`] for the entry point.

pub mod petri_net;

pub use petri_net::{Error, Marking, Net, Transition, TransitionBuilder};
