//! Exhaustive reachability exploration over a fixed transition set.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use super::marking::Marking;
use super::transition::Transition;

/// Explores every marking reachable from `start` via any finite firing
/// sequence drawn from `transitions`, including `start` itself.
///
/// A breadth-first worklist, not the design-level recursive description's
/// call stack: an explicit `VecDeque` keeps stack depth independent of how
/// deep the reachable set runs, while preserving the same "remember a
/// marking the first time it is seen, then explore every continuation of
/// it exactly once" semantics.
///
/// Operates entirely on owned copies; no lock is held during exploration.
/// `start` is assumed to already be a consistent snapshot -- see
/// `Net::reachable`, which takes it under the net's lock before calling in.
pub(crate) fn explore<'t, P, I>(
    start: Marking<P>,
    transitions: I,
) -> HashSet<Marking<P>, ahash::RandomState>
where
    P: Eq + Hash + Clone + 't,
    I: IntoIterator<Item = &'t Transition<P>> + Clone,
{
    let mut reached: HashSet<Marking<P>, ahash::RandomState> = HashSet::default();
    let mut worklist: VecDeque<Marking<P>> = VecDeque::new();

    reached.insert(start.clone());
    worklist.push_back(start);

    while let Some(current) = worklist.pop_front() {
        for t in transitions.clone() {
            if !t.enabled_at(&current) {
                continue;
            }
            let mut next = current.clone();
            t.fire_into(&mut next);
            if reached.insert(next.clone()) {
                worklist.push_back(next);
            }
        }
    }

    reached
}
