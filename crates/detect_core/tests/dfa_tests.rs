use detect_core::dfa::{self, FAIL, HIT, INIT};
use detect_core::{Navigator, Term, Token};

fn compile(term: &Term) -> dfa::Dfa {
    let nav = Navigator::build(term);
    dfa::compile(&nav).expect("indicator should compile to a reachable hit state")
}

fn run(dfa: &dfa::Dfa, tokens: &[Token]) -> String {
    let mut state = INIT.to_string();
    for token in tokens {
        state = dfa.lookup(&state, token).unwrap_or(&state).to_string();
    }
    state
}

#[test]
fn test_or_reaches_hit_via_either_branch() {
    let term = Term::or(vec![Term::match_term("a", "1"), Term::match_term("b", "2")]);
    let compiled = compile(&term);
    assert_eq!(run(&compiled, &[Token::new("a", "1")]), HIT);
    assert_eq!(run(&compiled, &[Token::new("b", "2")]), HIT);
    assert_eq!(run(&compiled, &[Token::new("c", "3")]), INIT);
}

#[test]
fn test_deeply_nested_term_compiles_and_hits() {
    let term = Term::and(vec![
        Term::or(vec![Term::match_term("a", "1"), Term::match_term("b", "2")]),
        Term::not(Term::match_term("c", "3")),
    ]);
    let compiled = compile(&term);
    let state = run(&compiled, &[Token::new("a", "1"), Token::end()]);
    assert_eq!(state, HIT);

    let state = run(&compiled, &[Token::new("a", "1"), Token::new("c", "3"), Token::end()]);
    assert_eq!(state, FAIL);
}

#[test]
fn test_fail_is_absorbing_across_the_whole_dfa() {
    let term = Term::and(vec![
        Term::match_term("a", "1"),
        Term::not(Term::match_term("b", "2")),
    ]);
    let compiled = compile(&term);
    assert!(compiled.entries().all(|(current, _, _)| current != FAIL));
}

#[test]
fn test_activators_are_exactly_the_inits_outgoing_tokens() {
    let term = Term::or(vec![Term::match_term("a", "1"), Term::match_term("b", "2")]);
    let compiled = compile(&term);
    let mut activators: Vec<&Token> = compiled.activators().iter().collect();
    activators.sort_by(|x, y| x.r#type.cmp(&y.r#type));
    assert_eq!(activators, vec![&Token::new("a", "1"), &Token::new("b", "2")]);
}
