use itertools::Itertools;
use thiserror::Error;
use tracing::info;

use crate::automaton::{Automaton, MalformedAutomaton};
use crate::math::lcm;
use crate::minimization::{quotient, refine};
use crate::{StateLabel, Symbol};

/// Errors surfaced by [`analyze`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No final state is reachable from the given initial state, so any
    /// simulation from it would run forever.
    #[error("no final state is reachable from initial state {0}")]
    NoReachableFinal(String),
    /// One of the requested initial states is not part of the automaton.
    #[error(transparent)]
    Malformed(#[from] MalformedAutomaton),
}

/// Summary of one per-initial-state pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAnalysis<Q> {
    /// The initial state this component was driven from.
    pub initial: Q,
    /// Number of states reachable from the initial state.
    pub reachable_states: usize,
    /// Number of equivalence classes among the reachable states.
    pub equivalence_classes: usize,
    /// Transitions taken from the initial state until the first final state.
    pub steps_to_final: u64,
    /// Positive number of transitions to return from a final state back to a
    /// final state, i.e. the length of the final-state cycle.
    pub loop_length: u64,
}

/// Runs the full pipeline (prune, refine, quotient, simulate) independently
/// for every requested initial state over the shared transition table of
/// `automaton`, and reports per-component summary statistics. Components do
/// not couple: each one works on its own derived automaton.
///
/// The initial states are processed in sorted order, so the result is
/// deterministic regardless of how the caller collected them. Unlike the raw
/// simulator, this entry point refuses components whose pruned automaton has
/// no final state left, since simulating those would not terminate.
pub fn analyze<Q: StateLabel, S: Symbol>(
    automaton: &Automaton<Q, S>,
    initials: impl IntoIterator<Item = Q>,
    instructions: &[S],
) -> Result<Vec<ComponentAnalysis<Q>>, AnalysisError> {
    let mut components = Vec::new();

    for initial in initials.into_iter().unique().sorted() {
        let trimmed = automaton.with_initial(initial.clone())?.trim();
        if trimmed.finals().is_empty() {
            return Err(AnalysisError::NoReachableFinal(format!("{initial:?}")));
        }

        let partition = refine(&trimmed);
        let minimized = quotient(&trimmed, &partition);
        let steps_to_final = minimized.steps_to_final(instructions, None, false);

        let final_state = minimized
            .finals()
            .first()
            .expect("finals survive the quotient");
        let loop_length = minimized.steps_to_final(instructions, Some(final_state), true);

        info!(
            "component of {initial:?}: {} reachable states, {} classes, \
             final state after {steps_to_final} steps, loop of {loop_length}",
            trimmed.size(),
            partition.size()
        );
        components.push(ComponentAnalysis {
            initial,
            reachable_states: trimmed.size(),
            equivalence_classes: partition.size(),
            steps_to_final,
            loop_length,
        });
    }

    Ok(components)
}

/// Returns the first step count at which every component sits in its final
/// state simultaneously, given the per-component loop lengths: their least
/// common multiple. An empty iterator yields 1.
pub fn joint_arrival(loop_lengths: impl IntoIterator<Item = u64>) -> u64 {
    loop_lengths.into_iter().fold(1, lcm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::AutomatonBuilder;

    /// The haunted-wasteland ghost map: two disjoint components sharing one
    /// table, with cycle lengths 2 and 3 over the instructions "LR".
    fn ghost_map() -> Automaton<&'static str, char> {
        AutomatonBuilder::default()
            .with_transitions([
                ("11A", 'L', "11B"),
                ("11A", 'R', "XXX"),
                ("11B", 'L', "XXX"),
                ("11B", 'R', "11Z"),
                ("11Z", 'L', "11B"),
                ("11Z", 'R', "XXX"),
                ("22A", 'L', "22B"),
                ("22A", 'R', "XXX"),
                ("22B", 'L', "22C"),
                ("22B", 'R', "22C"),
                ("22C", 'L', "22Z"),
                ("22C", 'R', "22Z"),
                ("22Z", 'L', "22B"),
                ("22Z", 'R', "22B"),
                ("XXX", 'L', "XXX"),
                ("XXX", 'R', "XXX"),
            ])
            .with_final_states(["11Z", "22Z"])
            .into_automaton("11A")
            .unwrap()
    }

    #[test_log::test]
    fn components_are_analyzed_independently() {
        let components = analyze(&ghost_map(), ["22A", "11A"], &['L', 'R']).unwrap();
        assert_eq!(components.len(), 2);

        // Sorted by initial state, regardless of the order passed in.
        assert_eq!(components[0].initial, "11A");
        assert_eq!(components[0].steps_to_final, 2);
        assert_eq!(components[0].loop_length, 2);
        assert_eq!(components[0].reachable_states, 4);

        assert_eq!(components[1].initial, "22A");
        assert_eq!(components[1].steps_to_final, 3);
        assert_eq!(components[1].loop_length, 3);
    }

    #[test]
    fn joint_arrival_is_the_lcm_of_loop_lengths() {
        let components = analyze(&ghost_map(), ["11A", "22A"], &['L', 'R']).unwrap();
        let joint = joint_arrival(components.iter().map(|c| c.loop_length));
        assert_eq!(joint, 6);
        assert_eq!(joint_arrival([]), 1);
    }

    #[test]
    fn unreachable_final_is_rejected_up_front() {
        // From XXX the only reachable state is the non-final sink itself.
        let error = analyze(&ghost_map(), ["XXX"], &['L', 'R']).unwrap_err();
        assert_eq!(
            error,
            AnalysisError::NoReachableFinal(format!("{:?}", "XXX"))
        );
    }

    #[test]
    fn foreign_initial_states_are_reported() {
        assert!(matches!(
            analyze(&ghost_map(), ["33A"], &['L', 'R']),
            Err(AnalysisError::Malformed(_))
        ));
    }
}
