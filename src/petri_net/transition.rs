//! Immutable transition descriptors: the four arc sets a transition owns.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::marking::Marking;

/// A transition's input, output, inhibitor and reset arcs, plus an optional
/// cosmetic name used only for `Display` and logging.
///
/// Constructed once and shared read-only across threads; no operation here
/// mutates a `Transition`. Callers that need to know which transition a
/// `fire` call selected get back a clone of this value, so `Transition`
/// derives `PartialEq`/`Eq` over all four arc sets plus name.
#[derive(Debug, Clone)]
pub struct Transition<P: Eq + Hash> {
    name: Option<String>,
    input: HashMap<P, usize, ahash::RandomState>,
    output: HashMap<P, usize, ahash::RandomState>,
    inhibitor: HashSet<P, ahash::RandomState>,
    reset: HashSet<P, ahash::RandomState>,
}

impl<P: Eq + Hash> PartialEq for Transition<P> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.input == other.input
            && self.output == other.output
            && self.inhibitor == other.inhibitor
            && self.reset == other.reset
    }
}

impl<P: Eq + Hash> Eq for Transition<P> {}

impl<P: Eq + Hash> std::fmt::Display for Transition<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("<unnamed>"))
    }
}

impl<P: Eq + Hash + Clone> Transition<P> {
    /// Constructs a transition directly from its four arc collections.
    ///
    /// Inputs are expected well-formed (all weights `>= 1`); this
    /// constructor does not validate them. Use [`TransitionBuilder`] for a
    /// fluent construction path that rejects zero weights at build time.
    pub fn new(
        input: impl IntoIterator<Item = (P, usize)>,
        output: impl IntoIterator<Item = (P, usize)>,
        inhibitor: impl IntoIterator<Item = P>,
        reset: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            name: None,
            input: input.into_iter().collect(),
            output: output.into_iter().collect(),
            inhibitor: inhibitor.into_iter().collect(),
            reset: reset.into_iter().collect(),
        }
    }

    /// Attaches a cosmetic name, used only by `Display` and logging.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The transition's display name, if one was set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// True iff every input arc's place holds at least its weight and every
    /// inhibitor arc's place holds zero tokens. The reset set does not
    /// participate in enabling.
    pub(crate) fn enabled_at(&self, marking: &Marking<P>) -> bool {
        self.input.iter().all(|(place, &weight)| marking.get(place) >= weight)
            && self.inhibitor.iter().all(|place| marking.get(place) == 0)
    }

    /// Applies this transition's effect to `marking` in place: subtract
    /// inputs, then add outputs, then zero resets. Assumes the caller has
    /// already confirmed [`Transition::enabled_at`].
    pub(crate) fn fire_into(&self, marking: &mut Marking<P>) {
        for (place, &weight) in &self.input {
            marking.add_delta(place.clone(), -(weight as isize));
        }
        for (place, &weight) in &self.output {
            marking.add_delta(place.clone(), weight as isize);
        }
        for place in &self.reset {
            marking.zero(place);
        }
    }
}

/// A fluent constructor for [`Transition`] that validates arc weights.
///
/// Grounded on the corpus's preference for small, type-safe builders over
/// bare struct literals wherever a value has more than one optional or
/// validated component.
pub struct TransitionBuilder<P: Eq + Hash> {
    name: Option<String>,
    input: HashMap<P, usize, ahash::RandomState>,
    output: HashMap<P, usize, ahash::RandomState>,
    inhibitor: HashSet<P, ahash::RandomState>,
    reset: HashSet<P, ahash::RandomState>,
}

impl<P: Eq + Hash + Clone> TransitionBuilder<P> {
    /// Starts an empty builder (no arcs, no name).
    pub fn new() -> Self {
        Self {
            name: None,
            input: HashMap::default(),
            output: HashMap::default(),
            inhibitor: HashSet::default(),
            reset: HashSet::default(),
        }
    }

    /// Adds an input arc. Panics if `weight == 0`: a zero-weight input arc
    /// is always satisfied and is almost certainly a mistake.
    pub fn input(mut self, place: P, weight: usize) -> Self {
        assert!(weight >= 1, "input arc weight must be >= 1");
        self.input.insert(place, weight);
        self
    }

    /// Adds an output arc. Panics if `weight == 0`, for the same reason as
    /// [`TransitionBuilder::input`].
    pub fn output(mut self, place: P, weight: usize) -> Self {
        assert!(weight >= 1, "output arc weight must be >= 1");
        self.output.insert(place, weight);
        self
    }

    /// Adds an inhibitor arc on `place`.
    pub fn inhibitor(mut self, place: P) -> Self {
        self.inhibitor.insert(place);
        self
    }

    /// Adds a reset arc on `place`.
    pub fn reset(mut self, place: P) -> Self {
        self.reset.insert(place);
        self
    }

    /// Attaches a cosmetic display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Finishes construction, yielding an immutable [`Transition`].
    pub fn build(self) -> Transition<P> {
        Transition {
            name: self.name,
            input: self.input,
            output: self.output,
            inhibitor: self.inhibitor,
            reset: self.reset,
        }
    }
}

impl<P: Eq + Hash + Clone> Default for TransitionBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_requires_sufficient_input_tokens() {
        let t = TransitionBuilder::new().input("p1", 2).build();
        let mut m = Marking::new();
        m.set("p1", 1);
        assert!(!t.enabled_at(&m));
        m.set("p1", 2);
        assert!(t.enabled_at(&m));
    }

    #[test]
    fn inhibitor_blocks_when_place_has_tokens() {
        let t = TransitionBuilder::new().inhibitor("p2").build();
        let mut m = Marking::new();
        assert!(t.enabled_at(&m));
        m.set("p2", 1);
        assert!(!t.enabled_at(&m));
    }

    #[test]
    fn reset_does_not_affect_enabling() {
        let t = TransitionBuilder::new().reset("a").build();
        let mut m = Marking::new();
        m.set("a", 5);
        assert!(t.enabled_at(&m));
    }

    #[test]
    fn fire_applies_input_then_output_then_reset() {
        let t = TransitionBuilder::new()
            .input("p", 2)
            .output("p", 5)
            .build();
        let mut m = Marking::new();
        m.set("p", 3);
        t.fire_into(&mut m);
        assert_eq!(m.get(&"p"), 6);
    }

    #[test]
    fn reset_after_output_zeroes_overlapping_place() {
        let t = TransitionBuilder::new()
            .input("b", 1)
            .output("a", 3)
            .reset("a")
            .build();
        let mut m = Marking::new();
        m.set("a", 5);
        m.set("b", 1);
        t.fire_into(&mut m);
        assert_eq!(m.get(&"a"), 0);
        assert!(m.is_empty());
    }

    #[test]
    #[should_panic(expected = "input arc weight must be >= 1")]
    fn builder_rejects_zero_weight_input() {
        TransitionBuilder::new().input("p", 0).build();
    }
}
