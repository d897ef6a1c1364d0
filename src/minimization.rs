pub(crate) mod partition_refinement;
pub use partition_refinement::refine;

use tracing::debug;

use crate::automaton::{Automaton, AutomatonBuilder};
use crate::math::Partition;
use crate::{StateLabel, Symbol};

/// Builds the quotient of `automaton` under `partition`. The states of the
/// quotient are the block indices of the partition, its transitions map
/// `(block(q), s)` to `block(transition(q, s))`, the initial state is the
/// block of the original initial state and the finals are the blocks of the
/// original final states.
///
/// For the induced transitions to be well-defined, all members of a block
/// must agree on the block of their target for every symbol. The partitions
/// produced by [`refine`] satisfy this; handing in an arbitrary partition
/// that does not will trip the determinism check during construction.
///
/// # Panics
/// Panics if `partition` does not cover all states of `automaton`.
pub fn quotient<Q: StateLabel, S: Symbol>(
    automaton: &Automaton<Q, S>,
    partition: &Partition<Q>,
) -> Automaton<usize, S> {
    let class_of = |state: &Q| {
        partition
            .class_of(state)
            .expect("partition must cover all states of the automaton")
    };

    AutomatonBuilder::default()
        .with_states(0..partition.size())
        .with_alphabet_symbols(automaton.alphabet().iter().cloned())
        .with_transitions(
            automaton
                .transitions()
                .iter()
                .map(|((source, symbol), target)| {
                    (class_of(source), symbol.clone(), class_of(target))
                }),
        )
        .with_final_states(automaton.finals().iter().map(class_of))
        .into_automaton(class_of(automaton.initial()))
        .expect("quotient of a well-formed automaton is well-formed")
}

impl<Q: StateLabel, S: Symbol> Automaton<Q, S> {
    /// Returns the unique (up to renaming of states) minimal automaton with
    /// the same behavior as `self`: every input word reaches a final state in
    /// the result after exactly the prefixes for which it does so in `self`.
    /// Unreachable states are removed first, then states that no word can
    /// tell apart are merged into one representative each. Minimization is
    /// idempotent.
    pub fn minimize(&self) -> Automaton<usize, S> {
        let trimmed = self.trim();
        let partition = refine(&trimmed);
        let minimized = quotient(&trimmed, &partition);
        debug!(
            "minimized automaton from {} states ({} reachable) to {}",
            self.size(),
            trimmed.size(),
            minimized.size()
        );
        minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::OrderedSet;
    use crate::tests::{lr_triangle, wiki_dfa};

    #[test_log::test]
    fn refine_separates_final_from_nonfinal_states() {
        let partition = refine(&lr_triangle());
        assert_eq!(partition, Partition::new([vec!["A", "B"], vec!["C"]]));
    }

    #[test]
    fn refinement_is_quotient_consistent() {
        // All states of a block must map into a single block, per symbol.
        let automaton = wiki_dfa();
        let partition = refine(&automaton);
        for block in &partition {
            for symbol in automaton.alphabet() {
                let image: OrderedSet<_> = block
                    .iter()
                    .map(|q| partition.class_of(automaton.successor(q, symbol)))
                    .collect();
                assert_eq!(image.len(), 1);
            }
        }
    }

    #[test_log::test]
    fn wiki_dfa_minimizes_to_three_states() {
        let minimized = wiki_dfa().minimize();
        assert_eq!(minimized.size(), 3);
        assert_eq!(minimized.finals().len(), 1);
    }

    #[test]
    fn minimization_is_idempotent() {
        for automaton in [wiki_dfa().minimize(), lr_triangle().minimize()] {
            assert_eq!(automaton.minimize().size(), automaton.size());
        }
    }

    #[test]
    fn minimized_automata_refine_into_singletons() {
        let minimized = wiki_dfa().minimize();
        let partition = refine(&minimized);
        assert_eq!(partition.size(), minimized.size());
        assert!(partition.iter().all(|block| block.len() == 1));
    }

    #[test]
    fn quotient_relabels_transitions_blockwise() {
        let automaton = lr_triangle();
        let partition = refine(&automaton);
        let quotiented = quotient(&automaton, &partition);

        assert_eq!(quotiented.size(), 2);
        let initial = quotiented.initial().to_owned();
        assert!(!quotiented.is_final(&initial));
        // Both symbols leave the merged {A, B} block or stay, as in the original.
        assert!(quotiented.is_final(quotiented.successor(&initial, &'R')));
        assert_eq!(quotiented.successor(&initial, &'L'), &initial);
    }

    #[test]
    fn refine_handles_trivial_partitions() {
        // No final states at all: a single class.
        let sink = AutomatonBuilder::default()
            .with_transitions([("A", 'x', "B"), ("B", 'x', "A")])
            .into_automaton("A")
            .unwrap();
        assert_eq!(refine(&sink).size(), 1);

        // Every state final: likewise.
        let all = AutomatonBuilder::default()
            .with_transitions([("A", 'x', "B"), ("B", 'x', "A")])
            .with_final_states(["A", "B"])
            .into_automaton("A")
            .unwrap();
        assert_eq!(refine(&all).size(), 1);
    }
}
