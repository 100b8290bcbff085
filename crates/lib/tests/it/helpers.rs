use dotted::{DottedMapping, HashSection, Node, TreeSection};

pub type TreeMapping = DottedMapping<TreeSection<i64>>;
pub type HashMapping = DottedMapping<HashSection<i64>>;

/// Create a mapping holding the canonical three-key example:
/// `a.b.c = 1`, `a.b.d = 2`, `a.e = 3`
pub fn setup_abc_mapping() -> TreeMapping {
    let mut mapping = TreeMapping::empty();
    mapping.set_leaf("a.b.c", 1).expect("Failed to set a.b.c");
    mapping.set_leaf("a.b.d", 2).expect("Failed to set a.b.d");
    mapping.set_leaf("a.e", 3).expect("Failed to set a.e");
    mapping
}

/// Keys of varying depth used by the property-style tests
pub fn sample_keys() -> Vec<&'static str> {
    vec![
        "top",
        "a.b",
        "a.c",
        "server.http.port",
        "server.http.host",
        "server.tls.enabled",
        "x.y.z.w.v",
    ]
}

/// Collect the flattened keys of a mapping in iteration order
pub fn collect_keys<S: dotted::Section>(mapping: &DottedMapping<S>) -> Vec<String> {
    mapping.keys().collect()
}

/// Assert that every `(key, value)` pair resolves to the expected leaf
pub fn assert_leaves(mapping: &TreeMapping, expected: &[(&str, i64)]) {
    for (key, expected_value) in expected {
        match mapping.get(key) {
            Ok(Node::Leaf(actual)) => {
                assert_eq!(actual, expected_value, "Value mismatch for key '{key}'")
            }
            Ok(Node::Section(_)) => panic!("Expected leaf for key '{key}', found a section"),
            Err(err) => panic!("Key '{key}' not resolvable: {err}"),
        }
    }
}
