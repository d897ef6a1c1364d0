//! Library for working with deterministic finite automata (DFAs).
//!
//! A DFA here is a finite set of states together with a total transition function
//! over a finite alphabet, a designated initial state and a set of final states.
//! The transition table is handed over fully specified, validated eagerly and
//! frozen into an immutable [`Automaton`] value. Every subsequent operation
//! derives a new value instead of mutating the original.
//!
//! The crate covers the classical pipeline for such automata:
//! - construction through [`AutomatonBuilder`], which accumulates transitions
//!   and then verifies the totality and membership invariants before an
//!   [`Automaton`] ever exists,
//! - reachability analysis and pruning of states that cannot be visited from
//!   the initial state ([`Automaton::reachable_states`], [`Automaton::trim`]),
//! - computation of the coarsest partition of states into Myhill-Nerode
//!   equivalence classes via Hopcroft-style partition refinement
//!   ([`minimization::refine`]),
//! - construction of the quotient automaton and thereby the unique minimal
//!   DFA with the same behavior ([`Automaton::minimize`]),
//! - simulation that drives an automaton along a cyclically repeated
//!   instruction word and counts the transitions taken until a final state is
//!   hit ([`Automaton::steps_to_final`]),
//! - a per-initial-state analysis pipeline for families of automata sharing
//!   one transition table ([`analysis::analyze`]), including the least common
//!   multiple of their return-cycle lengths ([`analysis::joint_arrival`]).
//!
//! All operations are synchronous and side-effect free on their inputs. Since
//! each [`Automaton`] value is self-contained, independent instances may be
//! processed in parallel without any synchronization.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude makes using this package easier. Importing everything with
/// `use minidfa::prelude::*;` should be enough to use the crate.
pub mod prelude {
    pub use super::{
        analysis,
        analysis::{AnalysisError, ComponentAnalysis},
        automaton::{Automaton, AutomatonBuilder, MalformedAutomaton},
        math,
        math::Partition,
        minimization,
        minimization::{quotient, refine},
        StateLabel, Symbol,
    };
}

/// Definitions of mathematical objects used throughout the crate, such as
/// collection aliases and [`math::Partition`].
pub mod math;

/// Defines the [`Automaton`] value, its construction and reachability.
pub mod automaton;
pub use automaton::{Automaton, AutomatonBuilder, MalformedAutomaton};

/// Partition refinement and quotient construction for minimizing automata.
pub mod minimization;

/// Instruction-driven simulation of automata.
pub mod run;

/// Per-initial-state pipelines over a shared transition table.
pub mod analysis;

use std::{fmt::Debug, hash::Hash};

/// An alphabet symbol. Symbols only need to be equality comparable and
/// hashable; no ordering is assumed beyond the iteration stability of the
/// collections in [`math`].
pub trait Symbol: Clone + Eq + Hash + Debug {}
impl<T: Clone + Eq + Hash + Debug> Symbol for T {}

/// A state label. States are interchangeable identifiers without payload;
/// source automata typically use strings while quotient automata use small
/// integer block indices. The `Ord` bound is what allows states to live in
/// ordered partition blocks.
pub trait StateLabel: Clone + Eq + Ord + Hash + Debug {}
impl<T: Clone + Eq + Ord + Hash + Debug> StateLabel for T {}
