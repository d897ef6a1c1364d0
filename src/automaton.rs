use std::collections::VecDeque;

use thiserror::Error;
use tracing::trace;

use crate::math::{Map, Set};
use crate::{StateLabel, Symbol};

mod builder;
pub use builder::AutomatonBuilder;

/// Ways in which a would-be automaton can violate the construction
/// invariants. All of these are detected eagerly, before an [`Automaton`]
/// value exists; they are never silently patched. The offending states and
/// symbols are captured in their `Debug` rendering so that the error type
/// stays independent of the automaton's type parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedAutomaton {
    /// The designated initial state is not a member of the state set.
    #[error("initial state {0} is not a member of the state set")]
    ForeignInitial(String),
    /// A designated final state is not a member of the state set.
    #[error("final state {0} is not a member of the state set")]
    ForeignFinal(String),
    /// The transition table has no entry for a (state, symbol) pair, i.e. it
    /// is not total on `states × alphabet`.
    #[error("transition table has no entry for state {state} on symbol {symbol}")]
    MissingTransition {
        /// The state missing an outgoing transition.
        state: String,
        /// The symbol for which no transition is defined.
        symbol: String,
    },
    /// A transition points at a state outside of the state set.
    #[error("transition from {state} on {symbol} leads to {target}, which is not a state")]
    ForeignTarget {
        /// The source state of the offending transition.
        state: String,
        /// The symbol of the offending transition.
        symbol: String,
        /// The target, which is not a member of the state set.
        target: String,
    },
    /// Two transitions for the same (state, symbol) pair disagree on their
    /// target, so the table does not describe a deterministic automaton.
    #[error("conflicting transitions from state {state} on symbol {symbol}")]
    AmbiguousTransition {
        /// The source state with conflicting transitions.
        state: String,
        /// The symbol with conflicting transitions.
        symbol: String,
    },
}

impl MalformedAutomaton {
    pub(crate) fn foreign_initial<Q: StateLabel>(state: &Q) -> Self {
        Self::ForeignInitial(format!("{state:?}"))
    }

    pub(crate) fn foreign_final<Q: StateLabel>(state: &Q) -> Self {
        Self::ForeignFinal(format!("{state:?}"))
    }

    pub(crate) fn missing_transition<Q: StateLabel, S: Symbol>(state: &Q, symbol: &S) -> Self {
        Self::MissingTransition {
            state: format!("{state:?}"),
            symbol: format!("{symbol:?}"),
        }
    }

    pub(crate) fn foreign_target<Q: StateLabel, S: Symbol>(
        state: &Q,
        symbol: &S,
        target: &Q,
    ) -> Self {
        Self::ForeignTarget {
            state: format!("{state:?}"),
            symbol: format!("{symbol:?}"),
            target: format!("{target:?}"),
        }
    }

    pub(crate) fn ambiguous_transition<Q: StateLabel, S: Symbol>(state: &Q, symbol: &S) -> Self {
        Self::AmbiguousTransition {
            state: format!("{state:?}"),
            symbol: format!("{symbol:?}"),
        }
    }
}

/// A deterministic finite automaton over states `Q` and symbols `S`.
///
/// Values of this type uphold, by construction, that the initial state is a
/// member of the state set, the final states are a subset of it, and the
/// transition table is total on `states × alphabet` with all targets inside
/// the state set. An `Automaton` is immutable; operations like [`Self::trim`]
/// and [`Self::minimize`](crate::minimization) derive new values.
#[derive(Debug, Clone)]
pub struct Automaton<Q, S> {
    states: Set<Q>,
    alphabet: Set<S>,
    transitions: Map<(Q, S), Q>,
    initial: Q,
    finals: Set<Q>,
}

// Not derived: set and map equality need `Hash + Eq` on the elements, which
// a derive would not require of `Q` and `S`.
impl<Q: StateLabel, S: Symbol> PartialEq for Automaton<Q, S> {
    fn eq(&self, other: &Self) -> bool {
        self.initial == other.initial
            && self.states == other.states
            && self.alphabet == other.alphabet
            && self.finals == other.finals
            && self.transitions == other.transitions
    }
}
impl<Q: StateLabel, S: Symbol> Eq for Automaton<Q, S> {}

impl<Q: StateLabel, S: Symbol> Automaton<Q, S> {
    /// Assembles an automaton from its parts, verifying every construction
    /// invariant. [`AutomatonBuilder`] funnels into this; it is the only
    /// public constructor.
    pub fn from_parts(
        states: Set<Q>,
        alphabet: Set<S>,
        transitions: Map<(Q, S), Q>,
        initial: Q,
        finals: Set<Q>,
    ) -> Result<Self, MalformedAutomaton> {
        if !states.contains(&initial) {
            return Err(MalformedAutomaton::foreign_initial(&initial));
        }
        if let Some(foreign) = finals.iter().find(|q| !states.contains(*q)) {
            return Err(MalformedAutomaton::foreign_final(foreign));
        }
        for state in &states {
            for symbol in &alphabet {
                match transitions.get(&(state.clone(), symbol.clone())) {
                    None => return Err(MalformedAutomaton::missing_transition(state, symbol)),
                    Some(target) if !states.contains(target) => {
                        return Err(MalformedAutomaton::foreign_target(state, symbol, target))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self {
            states,
            alphabet,
            transitions,
            initial,
            finals,
        })
    }

    /// Returns the set of states.
    pub fn states(&self) -> &Set<Q> {
        &self.states
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the alphabet over which the automaton operates.
    pub fn alphabet(&self) -> &Set<S> {
        &self.alphabet
    }

    /// Returns the transition table, a total mapping on `states × alphabet`.
    pub fn transitions(&self) -> &Map<(Q, S), Q> {
        &self.transitions
    }

    /// Returns the initial state.
    pub fn initial(&self) -> &Q {
        &self.initial
    }

    /// Returns the set of final states.
    pub fn finals(&self) -> &Set<Q> {
        &self.finals
    }

    /// Returns true if the given state is a final state.
    pub fn is_final(&self, state: &Q) -> bool {
        self.finals.contains(state)
    }

    /// Returns the state reached from `state` on `symbol`. The construction
    /// invariant guarantees an entry for every pair in `states × alphabet`,
    /// so this only panics when called with a state or symbol that does not
    /// belong to the automaton.
    pub fn successor(&self, state: &Q, symbol: &S) -> &Q {
        self.transitions
            .get(&(state.clone(), symbol.clone()))
            .expect("transition table is total on states × alphabet")
    }

    /// Derives an automaton that shares all parts of `self` but starts in
    /// `initial` instead. Fails if `initial` is not a state of `self`.
    pub fn with_initial(&self, initial: Q) -> Result<Self, MalformedAutomaton> {
        if !self.states.contains(&initial) {
            return Err(MalformedAutomaton::foreign_initial(&initial));
        }
        Ok(Self {
            initial,
            ..self.clone()
        })
    }

    /// Returns the set of states reachable from the initial state by zero or
    /// more transitions. Computed by breadth-first expansion over all alphabet
    /// symbols; every round either discovers a state or is the last, so the
    /// loop takes at most `|states|` rounds.
    pub fn reachable_states(&self) -> Set<Q> {
        let mut seen = Set::with_capacity(self.size());
        seen.insert(self.initial.clone());
        let mut queue = VecDeque::with_capacity(self.size());
        queue.push_back(self.initial.clone());

        while let Some(state) = queue.pop_front() {
            for symbol in &self.alphabet {
                let target = self.successor(&state, symbol);
                if seen.insert(target.clone()) {
                    trace!("discovered {target:?} from {state:?} on {symbol:?}");
                    queue.push_back(target.clone());
                }
            }
        }
        seen
    }

    /// Derives an equivalent automaton restricted to the states reachable
    /// from the initial state. The transition domain and the final states are
    /// filtered against the reachable set; the initial state is kept, as it
    /// is always reachable from itself. Trimming is a fixpoint, trimming a
    /// second time changes nothing.
    pub fn trim(&self) -> Self {
        let reachable = self.reachable_states();
        Self {
            transitions: self
                .transitions
                .iter()
                .filter(|((source, _), _)| reachable.contains(source))
                .map(|(key, target)| (key.clone(), target.clone()))
                .collect(),
            finals: self
                .finals
                .iter()
                .filter(|q| reachable.contains(*q))
                .cloned()
                .collect(),
            alphabet: self.alphabet.clone(),
            initial: self.initial.clone(),
            states: reachable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Set;

    #[test]
    fn construction_rejects_partial_table() {
        let result = AutomatonBuilder::default()
            .with_transitions([("A", 'L', "B"), ("B", 'L', "A"), ("A", 'R', "B")])
            .into_automaton("A");
        assert_eq!(
            result.unwrap_err(),
            MalformedAutomaton::missing_transition(&"B", &'R')
        );
    }

    #[test]
    fn construction_rejects_foreign_initial_and_final() {
        let builder = || {
            AutomatonBuilder::default()
                .with_transitions([("A", 'x', "A"), ("B", 'x', "A")])
        };
        assert_eq!(
            builder().into_automaton("Z").unwrap_err(),
            MalformedAutomaton::foreign_initial(&"Z")
        );
        assert_eq!(
            builder()
                .with_final_states(["Q"])
                .into_automaton("A")
                .unwrap_err(),
            MalformedAutomaton::foreign_final(&"Q")
        );
    }

    #[test]
    fn construction_rejects_nondeterminism() {
        let result = AutomatonBuilder::default()
            .with_transitions([("A", 'x', "A"), ("A", 'x', "B"), ("B", 'x', "B")])
            .into_automaton("A");
        assert_eq!(
            result.unwrap_err(),
            MalformedAutomaton::ambiguous_transition(&"A", &'x')
        );
    }

    #[test]
    fn from_parts_rejects_foreign_target() {
        let states: Set<_> = ["A"].into_iter().collect();
        let alphabet: Set<_> = ['x'].into_iter().collect();
        let transitions = [(("A", 'x'), "GONE")].into_iter().collect();
        let result = Automaton::from_parts(states, alphabet, transitions, "A", Set::default());
        assert_eq!(
            result.unwrap_err(),
            MalformedAutomaton::foreign_target(&"A", &'x', &"GONE")
        );
    }

    #[test_log::test]
    fn reachability_visits_whole_component() {
        let automaton = crate::tests::lr_triangle();
        let reachable = automaton.reachable_states();
        assert_eq!(reachable, ["A", "B", "C"].into_iter().collect::<Set<_>>());
    }

    #[test]
    fn trim_drops_unreachable_states_and_is_a_fixpoint() {
        // "X" and "Y" form a separate component with its own final state.
        let automaton = AutomatonBuilder::default()
            .with_transitions([
                ("A", 'x', "B"),
                ("B", 'x', "B"),
                ("X", 'x', "Y"),
                ("Y", 'x', "X"),
            ])
            .with_final_states(["B", "Y"])
            .into_automaton("A")
            .unwrap();

        let trimmed = automaton.trim();
        assert_eq!(trimmed.size(), 2);
        assert_eq!(trimmed.finals(), &["B"].into_iter().collect::<Set<_>>());
        assert_eq!(trimmed.transitions().len(), 2);
        assert_eq!(trimmed.reachable_states(), *trimmed.states());
        assert_eq!(trimmed.trim(), trimmed);
    }

    #[test]
    fn automaton_equality_is_value_based() {
        let automaton = AutomatonBuilder::default()
            .with_transitions([("A", 'x', "B"), ("B", 'x', "A")])
            .with_final_states(["B"])
            .into_automaton("A")
            .unwrap();
        // The same automaton, assembled in a different insertion order.
        let reordered = AutomatonBuilder::default()
            .with_transitions([("B", 'x', "A"), ("A", 'x', "B")])
            .with_final_states(["B"])
            .into_automaton("A")
            .unwrap();
        assert_eq!(automaton, reordered);
        assert_ne!(automaton, automaton.with_initial("B").unwrap());
    }

    #[test]
    fn with_initial_checks_membership() {
        let automaton = crate::tests::lr_triangle();
        assert_eq!(automaton.with_initial("B").unwrap().initial(), &"B");
        assert_eq!(
            automaton.with_initial("Z").unwrap_err(),
            MalformedAutomaton::foreign_initial(&"Z")
        );
    }
}
