//! Holds every compiled DFA and advances the active ones per token.

use std::collections::HashMap;

use tracing::trace;

use crate::dfa::{self, Dfa, HIT};
use crate::indicator::{Indicator, Indicators, Token};
use crate::navigator::Navigator;

/// A collection of indicators and their compiled DFAs, ready to scan a
/// token stream.
///
/// Construction compiles every indicator once; after that, a `Collection`
/// is logically immutable except for its state table, which [`Reset`] and
/// [`Update`] mutate and [`GetHits`] reads.
///
/// [`Reset`]: Collection::reset
/// [`Update`]: Collection::update
/// [`GetHits`]: Collection::get_hits
pub struct Collection {
    /// Parallel to `indicators`: `dfas[i]` is the compiled automaton for
    /// `indicators[i]`. Degenerate indicators (no reachable `hit`) are
    /// dropped and never appear here.
    dfas: Vec<Dfa>,
    indicators: Vec<Indicator>,
    /// Maps a token to the indices (into `dfas`/`indicators`) of the DFAs
    /// it activates.
    activator_index: HashMap<Token, Vec<usize>>,
    /// Current state of every *active* DFA, by index. Absent means the DFA
    /// is implicitly in `init` and inactive.
    state: HashMap<usize, String>,
}

impl Collection {
    /// Compiles every indicator in `indicators` into a DFA, silently
    /// dropping degenerate ones (they can never hit, so they contribute
    /// nothing at runtime).
    #[must_use]
    pub fn compile(indicators: Indicators) -> Collection {
        let mut dfas = Vec::new();
        let mut kept = Vec::new();
        let mut activator_index: HashMap<Token, Vec<usize>> = HashMap::new();

        for indicator in indicators.indicators {
            let nav = Navigator::build(&indicator.term);
            let _span = tracing::debug_span!("compile_indicator", id = %indicator.id, basic_nodes = nav.basic_nodes().len()).entered();
            match dfa::compile(&nav) {
                Some(compiled) => {
                    let index = dfas.len();
                    for token in compiled.activators() {
                        activator_index.entry(token.clone()).or_default().push(index);
                    }
                    dfas.push(compiled);
                    kept.push(indicator);
                }
                None => {
                    tracing::debug!(id = %indicator.id, "indicator compiled with no reachable hit state; dropped");
                }
            }
        }

        Collection {
            dfas,
            indicators: kept,
            activator_index,
            state: HashMap::new(),
        }
    }

    /// Clears every active DFA back to its implicit `init` state.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Advances every active DFA, and any newly-activated ones, by one
    /// token.
    ///
    /// Activation happens before advancing, so the token that first
    /// activates a DFA is also consumed by it within this same call.
    pub fn update(&mut self, token: &Token) {
        if let Some(indices) = self.activator_index.get(token) {
            for &index in indices {
                self.state.entry(index).or_insert_with(|| dfa::INIT.to_string());
            }
        }

        for (&index, current) in self.state.iter_mut() {
            if let Some(next) = self.dfas[index].lookup(current, token) {
                trace!(index, from = %current, to = %next, "dfa transition");
                *current = next.to_string();
            }
        }
    }

    /// Every indicator whose DFA currently sits in `hit`.
    #[must_use]
    pub fn get_hits(&self) -> Vec<&Indicator> {
        self.state
            .iter()
            .filter(|(_, state)| state.as_str() == HIT)
            .map(|(&index, _)| &self.indicators[index])
            .collect()
    }

    /// The number of compiled (non-degenerate) DFAs held by this collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dfas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dfas.is_empty()
    }

    /// The current state of each active DFA, by indicator id. For
    /// dump/debug use.
    pub fn active_states(&self) -> impl Iterator<Item = (&str, &str)> {
        self.state
            .iter()
            .map(|(&index, state)| (self.indicators[index].id.as_str(), state.as_str()))
    }
}
