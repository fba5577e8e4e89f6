//! Compiles boolean expressions over discrete match terms into
//! deterministic finite-state machines, and runs many of them at once
//! against a stream of tokens.
//!
//! An indicator is a term tree (`and`/`or`/`not`/match) describing a
//! compound event. [`dfa::compile`] turns one indicator's tree into a
//! [`dfa::Dfa`] by exhaustively enumerating subsets of its "basic nodes";
//! [`runtime::Collection`] compiles a whole [`indicator::Indicators`]
//! document and advances every indicator's DFA together as tokens arrive.

pub mod combination;
pub mod dfa;
pub mod dump;
pub mod error;
pub mod evaluator;
pub mod indicator;
pub mod navigator;
pub mod runtime;
pub mod subset;
pub mod term;

pub use dfa::Dfa;
pub use error::LoadError;
pub use indicator::{load_indicators_file, load_indicators_str, Descriptor, Indicator, Indicators, Token};
pub use navigator::{NodeId, Navigator};
pub use runtime::Collection;
pub use term::Term;
