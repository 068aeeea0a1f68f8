//! Rewrite-rule compiler: context-dependent rewrite rules to finite-state
//! transducers, by Hulden's triple-tape construction.
//!
//! A rule `A -> B / L _ R` is compiled by encoding candidate rewritings as
//! strings of aligned three-symbol columns. Tape 1 carries bracketing
//! markers (`O` outside a rewritten span, I-markers inside), tape 2 the
//! input side and tape 3 the output side of each column; rule semantics
//! (contexts, obligatoriness, the four match-disambiguation strategies)
//! become ordinary language intersections over this encoding, and a final
//! cleanup pass collapses the surviving triple strings into a two-tape
//! transducer.
//!
//! # Architecture
//!
//! - [`net`] -- the [`Net`] automaton wrapper: explicit alphabet, open-world
//!   wildcard, copy-on-write sharing, and promotion before binary algebra
//! - [`tapes`] -- tape lifting, alignment, and the delimited action span
//!   (`cross`, `cross_from_relation`, `cross_markup`)
//! - [`project`] -- `upper`/`lower`/`unrewritten`, the effective-string
//!   views of a triple-tape fragment
//! - [`strategy`] -- longest/shortest/leftmost/rightmost fragments,
//!   `not_contain`, and the epenthesis context operators
//! - [`cleanup`] -- special-symbol filters and the rule finalizer
//! - [`rule`] -- the rule description consumed by [`compile_rule`]
//! - [`compile`] -- the entry point assembling a whole rule
//!
//! The single public operation is [`compile_rule`]; everything else is
//! exported for tests and for callers that build rule variants by hand.

pub mod cleanup;
pub mod compile;
pub mod net;
pub mod project;
pub mod rule;
pub mod strategy;
pub mod tapes;

pub use compile::compile_rule;
pub use net::{Net, Source};
pub use rule::{Direction, MatchStrategy, RuleAction, RuleParts, RuleSpec};

/// Error type of the rule compiler. Every public entry point returns a
/// valid [`Net`] or one of these; there are no partially-built results,
/// and an empty transducer is a valid outcome rather than an error.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error(transparent)]
    Core(#[from] sauma_core::CoreError),
    #[error(transparent)]
    Engine(#[from] sauma_engine::EngineError),
}
