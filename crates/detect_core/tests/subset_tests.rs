use detect_core::subset::enumerate_subsets;

#[test]
fn test_empty_basic_set_yields_one_subset() {
    let subsets = enumerate_subsets(&[]);
    assert_eq!(subsets.len(), 1);
    assert!(subsets[0].is_empty());
}

#[test]
fn test_four_basic_nodes_yield_sixteen_subsets() {
    let subsets = enumerate_subsets(&[1, 2, 3, 4]);
    assert_eq!(subsets.len(), 16);
}
