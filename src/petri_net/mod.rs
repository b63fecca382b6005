//! A Petri net: one marking, one lock, one condition variable.
//!
//! The net owns exactly one [`Marking`] and exposes two operations over it:
//! a blocking [`Net::fire`] that atomically selects and fires one enabled
//! transition out of a caller-supplied set, and a non-blocking
//! [`Net::reachable`] that enumerates every marking reachable from the
//! current one via a transition set. Both are built on the same
//! single-transition enabling/firing kernel in [`Transition`].

pub mod error;
pub mod marking;
pub mod reachability;
pub mod transition;

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};

pub use error::PetriNetError as Error;
pub use marking::Marking;
pub use transition::{Transition, TransitionBuilder};

/// How often a cancellable `fire` re-checks its cancellation flag while
/// waiting. Cancellation has no dedicated wakeup, so the wait is a bounded
/// poll rather than an indefinite block; this is an implementation detail,
/// not part of the contract.
const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A concurrent Petri net over place identifier `P`.
///
/// Cheap to share across threads behind an `Arc<Net<P>>`; all synchronization
/// is internal. `P` only needs to be `Eq + Hash + Clone` -- the engine never
/// interprets place identifiers beyond comparing and hashing them.
pub struct Net<P: Eq + Hash> {
    state: Mutex<Marking<P>>,
    condvar: Condvar,
    fair: bool,
}

impl<P> Net<P>
where
    P: Eq + Hash + Clone,
{
    /// Constructs a net with the given initial marking. `initial` is copied
    /// and filtered to strip any non-positive entries, restoring the sparse
    /// invariant regardless of what the caller handed in.
    ///
    /// `fair` selects, on every successful fire, whether the lock is
    /// released via [`MutexGuard::unlock_fair`] (FIFO-ish hand-off to the
    /// woken waiter) or an ordinary guard drop (unordered, higher
    /// throughput).
    pub fn new(initial: Marking<P>, fair: bool) -> Self {
        Self {
            state: Mutex::new(initial.retain_positive()),
            condvar: Condvar::new(),
            fair,
        }
    }

    /// A sparse snapshot of the current marking.
    pub fn marking(&self) -> Marking<P> {
        self.state.lock().snapshot()
    }

    /// Blocks until some `t` in `transitions` is enabled, fires the first
    /// such `t` (in iteration order), and returns a clone of it.
    ///
    /// Never returns an error: this is a thin wrapper over
    /// [`Net::fire_cancellable`] with a cancellation flag that is never set.
    /// Panics if `transitions` is empty, per the engine's "programmer
    /// error" taxonomy (misuse is not a recoverable runtime condition).
    pub fn fire<'t, I>(&self, transitions: I) -> Transition<P>
    where
        I: IntoIterator<Item = &'t Transition<P>>,
        P: 't,
    {
        let never_cancel = AtomicBool::new(false);
        self.fire_cancellable(transitions, &never_cancel)
            .expect("fire() never cancels")
    }

    /// As [`Net::fire`], but the wait is interrupted as soon as `cancel`
    /// reads `true`, returning [`Error::Cancelled`] without firing and
    /// without mutating the marking.
    ///
    /// `cancel` is polled at [`CANCEL_POLL_INTERVAL`]; there is no
    /// dedicated wakeup for cancellation, so a cancelled wait resolves
    /// within that interval rather than immediately.
    ///
    /// Panics if `transitions` is empty.
    pub fn fire_cancellable<'t, I>(
        &self,
        transitions: I,
        cancel: &AtomicBool,
    ) -> Result<Transition<P>, Error>
    where
        I: IntoIterator<Item = &'t Transition<P>>,
        P: 't,
    {
        let transitions: Vec<&'t Transition<P>> = transitions.into_iter().collect();
        assert!(!transitions.is_empty(), "fire: transitions must not be empty");

        let mut guard = self.state.lock();
        tracing::trace!("fire: acquired lock");
        loop {
            if cancel.load(Ordering::Acquire) {
                tracing::debug!("fire: cancelled while waiting");
                return Err(Error::Cancelled);
            }
            if let Some(winner) = first_enabled(transitions.iter().copied(), &guard) {
                winner.fire_into(&mut guard);
                let fired = winner.clone();
                tracing::debug!(transition = ?fired.name(), "fire: fired");
                self.condvar.notify_one();
                if self.fair {
                    MutexGuard::unlock_fair(guard);
                } else {
                    drop(guard);
                }
                return Ok(fired);
            }
            tracing::trace!("fire: nothing enabled, waiting");
            self.condvar.wait_for(&mut guard, CANCEL_POLL_INTERVAL);
        }
    }

    /// As [`Net::fire`], but gives up after `timeout` elapses with nothing
    /// enabled, returning [`Error::TimedOut`] without firing and without
    /// mutating the marking. Not part of the core blocking contract; a
    /// convenience layered on top of it.
    ///
    /// Panics if `transitions` is empty.
    pub fn fire_timeout<'t, I>(
        &self,
        transitions: I,
        timeout: Duration,
    ) -> Result<Transition<P>, Error>
    where
        I: IntoIterator<Item = &'t Transition<P>>,
        P: 't,
    {
        let transitions: Vec<&'t Transition<P>> = transitions.into_iter().collect();
        assert!(!transitions.is_empty(), "fire_timeout: transitions must not be empty");

        let deadline = Instant::now() + timeout;
        let mut guard = self.state.lock();
        loop {
            if let Some(winner) = first_enabled(transitions.iter().copied(), &guard) {
                winner.fire_into(&mut guard);
                let fired = winner.clone();
                tracing::debug!(transition = ?fired.name(), "fire_timeout: fired");
                self.condvar.notify_one();
                if self.fair {
                    MutexGuard::unlock_fair(guard);
                } else {
                    drop(guard);
                }
                return Ok(fired);
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                tracing::debug!("fire_timeout: deadline elapsed");
                return Err(Error::TimedOut);
            }
            self.condvar.wait_for(&mut guard, remaining);
        }
    }

    /// Every marking reachable from the marking observed at call entry via
    /// any finite firing sequence drawn from `transitions`, including the
    /// starting marking itself.
    ///
    /// The initial snapshot is taken under the lock; exploration then
    /// proceeds over owned copies without holding it. If other threads are
    /// concurrently firing, the result reflects the snapshot taken at call
    /// entry, not the net's state at return time -- `reachable` answers
    /// "what was reachable then," not "what is reachable now."
    ///
    /// Terminates only if the net is bounded under `transitions`; an
    /// unbounded net causes this call to run until memory is exhausted. The
    /// engine makes no attempt to detect unboundedness.
    pub fn reachable<'t, I>(&self, transitions: I) -> HashSet<Marking<P>, ahash::RandomState>
    where
        I: IntoIterator<Item = &'t Transition<P>> + Clone,
        P: 't,
    {
        let start = self.marking();
        tracing::trace!("reachable: snapshot taken, exploring");
        let reached = reachability::explore(start, transitions);
        tracing::debug!(count = reached.len(), "reachable: done");
        reached
    }
}

fn first_enabled<'t, P, I>(transitions: I, marking: &Marking<P>) -> Option<&'t Transition<P>>
where
    P: Eq + Hash + Clone + 't,
    I: IntoIterator<Item = &'t Transition<P>>,
{
    transitions.into_iter().find(|t| t.enabled_at(marking))
}
