//! Textual dump utilities for term trees, navigators, compiled DFAs and a
//! collection's live state table. Debugging aids only — no interactive
//! visualization is built here.

use std::fmt::Write as _;

use crate::dfa::Dfa;
use crate::navigator::Navigator;
use crate::runtime::Collection;
use crate::term::Term;

/// Renders an indented dump of a term tree, one node per line.
#[must_use]
pub fn dump_term(term: &Term) -> String {
    let mut out = String::new();
    write_term(&mut out, term, 0);
    out
}

fn write_term(out: &mut String, term: &Term, indent: usize) {
    let pad = "  ".repeat(indent);
    match term {
        Term::And(children) => {
            let _ = writeln!(out, "{pad}And");
            for child in children {
                write_term(out, child, indent + 1);
            }
        }
        Term::Or(children) => {
            let _ = writeln!(out, "{pad}Or");
            for child in children {
                write_term(out, child, indent + 1);
            }
        }
        Term::Not(child) => {
            let _ = writeln!(out, "{pad}Not");
            write_term(out, child, indent + 1);
        }
        Term::Match { r#type, value } => {
            let _ = writeln!(out, "{pad}{type}: {value}");
        }
    }
}

/// Renders a summary of a navigator: node count, basic nodes, match terms.
#[must_use]
pub fn dump_navigator(nav: &Navigator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "nodes: {}", nav.len());
    let _ = writeln!(out, "root: {}", nav.label(nav.root()));

    let mut basic: Vec<String> = nav.basic_nodes().iter().map(|&id| nav.label(id)).collect();
    basic.sort();
    let _ = writeln!(out, "basic nodes: {}", basic.join(", "));

    let matches: Vec<String> = nav
        .match_terms()
        .iter()
        .map(|&id| {
            let (r#type, value) = nav.match_pair(id);
            format!("{}={type}:{value}", nav.label(id))
        })
        .collect();
    let _ = writeln!(out, "match terms: {}", matches.join(", "));
    out
}

/// Renders every `(current, token) -> next` entry of a compiled DFA.
#[must_use]
pub fn dump_dfa(dfa: &Dfa) -> String {
    let mut lines: Vec<String> = dfa
        .entries()
        .map(|(current, token, next)| format!("{current} -> {}:{} -> {next}", token.r#type, token.value))
        .collect();
    lines.sort();
    lines.join("\n")
}

/// Renders the live state of every active DFA in a collection.
#[must_use]
pub fn dump_collection_state(collection: &Collection) -> String {
    let mut lines: Vec<String> = collection
        .active_states()
        .map(|(id, state)| format!("{id} in state {state}"))
        .collect();
    lines.sort();
    lines.join("\n")
}
