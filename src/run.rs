use tracing::trace;

use crate::automaton::Automaton;
use crate::{StateLabel, Symbol};

impl<Q: StateLabel, S: Symbol> Automaton<Q, S> {
    /// Drives the automaton along `instructions`, consumed cyclically (the
    /// sequence wraps around once exhausted), until a final state is reached.
    /// Returns the number of transitions taken. The run starts in `start`, or
    /// in the initial state if `start` is `None`.
    ///
    /// If the start state is already final and `require_step` is false, the
    /// count is 0 and no symbol is consumed. With `require_step` set, at
    /// least one transition is taken even from a final state; this measures
    /// the length of the cycle back to a final state rather than first
    /// arrival.
    ///
    /// The step count is a pure function of the arguments, since the
    /// transition function is total and deterministic.
    ///
    /// This does not terminate if no final state is ever reached along the
    /// instruction sequence. Establishing that one is reachable, for example
    /// by checking the finals of [`Self::trim`], is the caller's
    /// responsibility and is deliberately not re-checked here.
    ///
    /// # Panics
    /// Panics if a transition has to be taken but `instructions` is empty, or
    /// if `start` is not a state of the automaton.
    pub fn steps_to_final<'a>(
        &'a self,
        instructions: &[S],
        start: Option<&'a Q>,
        require_step: bool,
    ) -> u64 {
        let mut current = start.unwrap_or_else(|| self.initial());
        if self.is_final(current) && !require_step {
            return 0;
        }
        assert!(
            !instructions.is_empty(),
            "cannot take a transition without instructions"
        );

        let mut steps = 0;
        for symbol in instructions.iter().cycle() {
            current = self.successor(current, symbol);
            steps += 1;
            if self.is_final(current) {
                trace!("reached final state {current:?} after {steps} steps");
                return steps;
            }
        }
        unreachable!("cycled instruction sequence never runs out")
    }
}
