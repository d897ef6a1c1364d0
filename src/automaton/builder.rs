use indexmap::map::Entry;

use crate::math::{Map, Set};
use crate::{StateLabel, Symbol};

use super::{Automaton, MalformedAutomaton};

/// Helper struct for the construction of automata. It accumulates a list of
/// transitions together with optional extra states, alphabet symbols and the
/// final states, and freezes everything into an [`Automaton`] once the
/// initial state is supplied. Parsing code can thus build the table
/// incrementally while the resulting automaton stays immutable.
///
/// # Example
///
/// We build a two-state automaton over the alphabet `['a', 'b']` that starts
/// in state `0` and accepts in state `1`:
/// ```
/// use minidfa::prelude::*;
///
/// let automaton = AutomatonBuilder::default()
///     .with_transitions([(0, 'a', 0), (0, 'b', 1), (1, 'a', 1), (1, 'b', 0)])
///     .with_final_states([1])
///     .into_automaton(0) // 0 is the initial state
///     .unwrap();
/// assert_eq!(automaton.size(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder<Q, S> {
    states: Set<Q>,
    symbols: Set<S>,
    transitions: Vec<(Q, S, Q)>,
    finals: Set<Q>,
}

impl<Q, S> Default for AutomatonBuilder<Q, S> {
    fn default() -> Self {
        Self {
            states: Set::default(),
            symbols: Set::default(),
            transitions: vec![],
            finals: Set::default(),
        }
    }
}

impl<Q: StateLabel, S: Symbol> AutomatonBuilder<Q, S> {
    /// Adds a list of transitions, each given as a `(source, symbol, target)`
    /// triple. Source and target states as well as the symbol are recorded as
    /// part of the state set respectively the alphabet.
    pub fn with_transitions<I>(mut self, iter: I) -> Self
    where
        I: IntoIterator<Item = (Q, S, Q)>,
    {
        self.transitions.extend(iter);
        self
    }

    /// By default the state set consists of the states that appear on at
    /// least one transition. This method can be used to force additional
    /// states to exist.
    pub fn with_states<I: IntoIterator<Item = Q>>(mut self, iter: I) -> Self {
        self.states.extend(iter);
        self
    }

    /// By default the alphabet consists of the symbols that appear on at
    /// least one transition. This method can be used to force additional
    /// alphabet symbols to appear.
    pub fn with_alphabet_symbols<I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        self.symbols.extend(iter);
        self
    }

    /// Marks the given states as final.
    pub fn with_final_states<I: IntoIterator<Item = Q>>(mut self, iter: I) -> Self {
        self.finals.extend(iter);
        self
    }

    /// Freezes the accumulated table into an [`Automaton`] with the given
    /// initial state, verifying all construction invariants: the table must
    /// be total on `states × alphabet` and deterministic, and the initial
    /// and final states must be members of the state set.
    pub fn into_automaton(self, initial: Q) -> Result<Automaton<Q, S>, MalformedAutomaton> {
        let mut states = self.states;
        let mut alphabet = self.symbols;
        let mut transitions: Map<(Q, S), Q> = Map::with_capacity(self.transitions.len());

        for (source, symbol, target) in self.transitions {
            states.insert(source.clone());
            states.insert(target.clone());
            alphabet.insert(symbol.clone());
            match transitions.entry((source.clone(), symbol.clone())) {
                Entry::Occupied(entry) if *entry.get() != target => {
                    return Err(MalformedAutomaton::ambiguous_transition(&source, &symbol));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(target);
                }
            }
        }

        Automaton::from_parts(states, alphabet, transitions, initial, self.finals)
    }
}
