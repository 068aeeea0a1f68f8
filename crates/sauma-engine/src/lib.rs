//! Unweighted finite-state automaton/transducer algebra.
//!
//! This crate is the engine collaborator of the rule compiler: it provides
//! the automaton value type and the algebra primitives the triple-tape
//! combinators are written against. It knows nothing about rewrite rules
//! beyond two dedicated primitives ([`sync::flatten_for_rule`] and
//! [`sync::synchronize_rule`]) that operate on flat marker-annotated paths.
//!
//! # Architecture
//!
//! - [`fst`] -- the automaton value type and basic constructors
//! - [`algebra`] -- rational operations (union, concat, closure, product,
//!   projections, relabeling)
//! - [`compose`] -- transducer composition with wildcard label handling
//! - [`boolean`] -- intersection, difference and completion over acceptors
//! - [`optimize`] -- epsilon removal, determinization, minimization, trim
//! - [`paths`] -- bounded path enumeration for application and testing
//! - [`sync`] -- rule-alignment primitives
//! - [`config`] -- optimizer configuration
//!
//! Labels are [`sauma_core::Symbol`] values; the two wildcard labels
//! (`OTHER_ID`, `OTHER_NONID`) are treated as ordinary symbols except where
//! composition and projection must preserve or break their identity
//! reading. Open-world alphabet reconciliation happens above this crate.

pub mod algebra;
pub mod boolean;
pub mod compose;
pub mod config;
pub mod fst;
pub mod optimize;
pub mod paths;
pub mod sync;

pub use config::OptimizeConfig;
pub use fst::{Arc, Fst, State, StateId};

/// Error type for algebra preconditions and rule synchronization.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The operation requires a language (acceptor), not a relation.
    #[error("operand must be an acceptor")]
    NotAcceptor,
    /// The operation requires an epsilon-free automaton.
    #[error("operand must be epsilon-free")]
    NotEpsilonFree,
    /// The operation requires a deterministic automaton.
    #[error("operand must be deterministic")]
    NotDeterministic,
    /// The preprocessed rule fragment has a malformed pivot structure and
    /// cannot be turned into aligned transducer arcs. Reported to the rule
    /// author; never recovered locally.
    #[error("rule fragment cannot be synchronized: {0}")]
    Unsynchronizable(&'static str),
}
