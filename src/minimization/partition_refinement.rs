use std::collections::VecDeque;

use tracing::trace;

use crate::automaton::Automaton;
use crate::math::{OrderedSet, Partition};
use crate::{StateLabel, Symbol};

/// Computes the coarsest partition of the automaton's states into classes of
/// behaviorally indistinguishable states, i.e. the Myhill-Nerode equivalence:
/// two states share a block iff no input word drives one into a final state
/// and the other into a non-final state.
///
/// This is Hopcroft's worklist algorithm. Starting from the two-block
/// partition `{finals, states − finals}` (empty blocks dropped), a queue of
/// distinguishing blocks is processed; each popped block splits every current
/// block, per symbol, into the preimage of the distinguisher and the rest.
/// When a block genuinely splits, a queued copy of it is replaced by both
/// halves, otherwise only the smaller half is enqueued. The smaller-half rule
/// bounds the running time by `O(|alphabet| · |states| · log |states|)`; the
/// resulting partition does not depend on it.
pub fn refine<Q: StateLabel, S: Symbol>(automaton: &Automaton<Q, S>) -> Partition<Q> {
    let finals: OrderedSet<Q> = automaton.finals().iter().cloned().collect();
    let nonfinals: OrderedSet<Q> = automaton
        .states()
        .iter()
        .filter(|q| !automaton.is_final(q))
        .cloned()
        .collect();

    let mut partition: Vec<OrderedSet<Q>> = [finals, nonfinals]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect();

    let mut worklist: VecDeque<OrderedSet<Q>> = VecDeque::new();
    if let Some(smaller) = partition.iter().min_by_key(|block| block.len()) {
        worklist.push_back(smaller.clone());
    }

    while let Some(distinguisher) = worklist.pop_front() {
        for symbol in automaton.alphabet() {
            // Rebuild the block list instead of splicing into it mid-iteration.
            let mut refined = Vec::with_capacity(partition.len());
            for block in std::mem::take(&mut partition) {
                let (inside, outside) = split(automaton, &block, &distinguisher, symbol);
                if inside.is_empty() || outside.is_empty() {
                    refined.push(block);
                    continue;
                }
                trace!("{symbol:?} into {distinguisher:?} splits {inside:?} off {outside:?}");

                if let Some(queued) = worklist.iter().position(|waiting| *waiting == block) {
                    // The block is itself still waiting to distinguish others,
                    // so both halves have to take its place.
                    worklist.remove(queued);
                    worklist.push_back(inside.clone());
                    worklist.push_back(outside.clone());
                } else if inside.len() <= outside.len() {
                    worklist.push_back(inside.clone());
                } else {
                    worklist.push_back(outside.clone());
                }

                refined.push(inside);
                refined.push(outside);
            }
            partition = refined;
        }
    }

    Partition::from(partition)
}

/// Splits a block into the states that transition into the distinguishing
/// set on the given symbol and those that do not.
fn split<Q: StateLabel, S: Symbol>(
    automaton: &Automaton<Q, S>,
    block: &OrderedSet<Q>,
    distinguisher: &OrderedSet<Q>,
    symbol: &S,
) -> (OrderedSet<Q>, OrderedSet<Q>) {
    block
        .iter()
        .cloned()
        .partition(|state| distinguisher.contains(automaton.successor(state, symbol)))
}
