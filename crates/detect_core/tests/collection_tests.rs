use detect_core::{load_indicators_str, Collection, Token};

fn collection(json: &str) -> Collection {
    Collection::compile(load_indicators_str(json).unwrap())
}

#[test]
fn test_multiple_indicators_hit_independently() {
    let json = r#"{"indicators":[
        {"id":"i1","type":"a","value":"1"},
        {"id":"i2","type":"b","value":"2"}
    ]}"#;
    let mut c = collection(json);
    c.update(&Token::new("a", "1"));
    c.update(&Token::end());

    let mut hits: Vec<&str> = c.get_hits().iter().map(|i| i.id.as_str()).collect();
    hits.sort_unstable();
    assert_eq!(hits, vec!["i1"]);
}

#[test]
fn test_empty_and_children_is_a_load_error_not_a_dropped_indicator() {
    // a compile-time degenerate indicator (well-formed, unreachable hit) is
    // silently dropped from the collection; this is different — an empty
    // `and`/`or` is structurally malformed and rejected at load time.
    let json = r#"{"indicators":[{"id":"bad","and":[]}]}"#;
    let err = load_indicators_str(json);
    assert!(err.is_err());
}

#[test]
fn test_reset_clears_active_state_between_scans() {
    let json = r#"{"indicators":[{"id":"i1","type":"a","value":"1"}]}"#;
    let mut c = collection(json);
    c.update(&Token::new("a", "1"));
    c.update(&Token::end());
    assert_eq!(c.get_hits().len(), 1);

    c.reset();
    assert!(c.get_hits().is_empty());

    c.update(&Token::end());
    assert!(c.get_hits().is_empty(), "without re-feeding the match, it never hits");
}

#[test]
fn test_unrelated_tokens_do_not_activate_a_dfa() {
    let json = r#"{"indicators":[{"id":"i1","type":"a","value":"1"}]}"#;
    let mut c = collection(json);
    c.update(&Token::new("z", "9"));
    c.update(&Token::end());
    assert!(c.get_hits().is_empty());
}

#[test]
fn test_empty_indicators_document_compiles_to_empty_collection() {
    let c = collection(r#"{"indicators":[]}"#);
    assert!(c.is_empty());
    assert_eq!(c.len(), 0);
}
