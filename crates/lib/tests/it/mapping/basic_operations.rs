use dotted::{DottedMapping, MappingError, Node, Section, TreeSection};

use crate::helpers::*;

#[test]
fn test_set_then_get_returns_value() {
    let mut mapping = TreeMapping::empty();

    for (i, key) in sample_keys().into_iter().enumerate() {
        let value = i as i64 * 10;
        mapping.set_leaf(key, value).unwrap();
        assert_eq!(mapping.get(key).unwrap(), &Node::leaf(value));
        assert_eq!(mapping.get_leaf(key).unwrap(), &value);
    }
}

#[test]
fn test_set_returns_previous_node() {
    let mut mapping = TreeMapping::empty();

    assert_eq!(mapping.set_leaf("a.b", 1).unwrap(), None);
    assert_eq!(mapping.set_leaf("a.b", 2).unwrap(), Some(Node::leaf(1)));
    assert_eq!(mapping.get_leaf("a.b").unwrap(), &2);
}

#[test]
fn test_set_overwrites_section_without_merge() {
    let mut mapping = setup_abc_mapping();

    let old = mapping.set_leaf("a.b", 9).unwrap().unwrap();
    assert!(old.is_section());
    assert_eq!(old.as_section().unwrap().section_len(), 2);

    assert_eq!(collect_keys(&mapping), vec!["a.b", "a.e"]);
    assert_leaves(&mapping, &[("a.b", 9), ("a.e", 3)]);
}

#[test]
fn test_set_section_node() {
    let mut mapping = TreeMapping::empty();

    let mut inner = TreeSection::new();
    inner.insert_node("port".to_string(), Node::leaf(8080));
    mapping.set("server.http", Node::section(inner)).unwrap();

    assert_eq!(mapping.get_leaf("server.http.port").unwrap(), &8080);
    assert!(mapping.get_section("server.http").is_ok());
    assert_eq!(collect_keys(&mapping), vec!["server.http.port"]);
}

#[test]
fn test_set_twice_is_idempotent() {
    let mut mapping = setup_abc_mapping();
    let before = mapping.clone();

    mapping.set_leaf("a.b.c", 1).unwrap();
    mapping.set_leaf("a.b.c", 1).unwrap();

    assert_eq!(mapping, before);
    assert_eq!(collect_keys(&mapping), collect_keys(&before));
}

#[test]
fn test_delete_then_get_fails() {
    for key in sample_keys() {
        let mut mapping = TreeMapping::empty();
        mapping.set_leaf(key, 7).unwrap();

        assert_eq!(mapping.delete(key).unwrap(), Node::leaf(7));
        assert_eq!(
            mapping.get(key),
            Err(MappingError::KeyNotFound {
                key: key.to_string()
            })
        );
    }
}

#[test]
fn test_delete_keeps_empty_parent_sections() {
    let mut mapping = TreeMapping::empty();
    mapping.set_leaf("a.b.c", 1).unwrap();
    mapping.delete("a.b.c").unwrap();

    assert!(mapping.get_section("a.b").unwrap().is_empty());
    assert!(mapping.is_empty());
    assert_eq!(mapping.len(), 0);
}

#[test]
fn test_delete_whole_section() {
    let mut mapping = setup_abc_mapping();

    let removed = mapping.delete("a.b").unwrap();
    assert!(removed.is_section());
    assert_eq!(collect_keys(&mapping), vec!["a.e"]);
}

#[test]
fn test_delete_missing_key() {
    let mut mapping = setup_abc_mapping();

    assert_eq!(
        mapping.delete("a.b.zz"),
        Err(MappingError::KeyNotFound {
            key: "a.b.zz".to_string()
        })
    );
    assert_eq!(
        mapping.delete("q.r"),
        Err(MappingError::MissingSection {
            key: "q.r".to_string(),
            segment: "q".to_string()
        })
    );
    // Failed deletes do not create sections
    assert!(!mapping.contains_key("q"));
}

#[test]
fn test_pop() {
    let mut mapping = setup_abc_mapping();

    assert_eq!(mapping.pop("a.e").unwrap(), Some(Node::leaf(3)));
    assert_eq!(mapping.pop("a.e").unwrap(), None);
    assert_eq!(mapping.pop("missing.section.key").unwrap(), None);
    assert!(mapping.pop("a.b.c.d").unwrap_err().is_conflict());
}

#[test]
fn test_pop_first_until_empty() {
    let mut mapping = setup_abc_mapping();

    let mut popped = Vec::new();
    while let Some(pair) = mapping.pop_first().unwrap() {
        popped.push(pair);
    }
    assert_eq!(
        popped,
        vec![
            ("a.b.c".to_string(), 1),
            ("a.b.d".to_string(), 2),
            ("a.e".to_string(), 3)
        ]
    );
    assert!(mapping.is_empty());
    assert!(mapping.get_section("a.b").unwrap().is_empty_section());
}

#[test]
fn test_pop_first_hash_backed() {
    let mut mapping = HashMapping::empty();
    mapping.set_leaf("a.b", 1).unwrap();
    mapping.set_leaf("c", 2).unwrap();

    let (key, value) = mapping.pop_first().unwrap().unwrap();
    assert!(!mapping.contains_key(&key));
    assert_eq!(mapping.len(), 1);
    assert!(matches!((key.as_str(), value), ("a.b", 1) | ("c", 2)));
}

#[test]
fn test_get_mut_modifies_in_place() {
    let mut mapping = setup_abc_mapping();

    if let Some(value) = mapping.get_mut("a.b.d").unwrap().as_leaf_mut() {
        *value += 40;
    }
    assert_eq!(mapping.get_leaf("a.b.d").unwrap(), &42);
}

#[test]
fn test_contains_key() {
    let mapping = setup_abc_mapping();

    assert!(mapping.contains_key("a"));
    assert!(mapping.contains_key("a.b"));
    assert!(mapping.contains_key("a.b.c"));
    assert!(!mapping.contains_key("a.b.x"));
    assert!(!mapping.contains_key("x.y"));
    assert!(!mapping.contains_key("a..b"));
    assert!(!TreeMapping::new().contains_key("a"));
}

#[test]
fn test_get_leaf_and_get_section_mismatch() {
    let mapping = setup_abc_mapping();

    assert_eq!(
        mapping.get_leaf("a.b"),
        Err(MappingError::LeafExpected {
            key: "a.b".to_string()
        })
    );
    assert_eq!(
        mapping.get_section("a.e").unwrap_err(),
        MappingError::NotASection {
            key: "a.e".to_string()
        }
    );
}

#[test]
fn test_clear_keeps_mapping_ready() {
    let mut mapping = setup_abc_mapping();

    mapping.clear().unwrap();
    assert!(mapping.is_initialized());
    assert!(mapping.is_empty());

    mapping.set_leaf("again", 1).unwrap();
    assert_eq!(mapping.len(), 1);
}

#[test]
fn test_clear_drops_empty_sections() {
    let mut mapping = TreeMapping::empty();
    mapping.set("empty", Node::empty_section()).unwrap();
    mapping.set_leaf("a.b", 1).unwrap();

    mapping.clear().unwrap();
    assert!(!mapping.contains_key("empty"));
    assert!(!mapping.contains_key("a"));
    assert!(mapping.base().unwrap().is_empty_section());
}

#[test]
fn test_try_extend() {
    let mut mapping = TreeMapping::empty();
    mapping
        .try_extend([("a.b", Node::leaf(1)), ("a.c", Node::leaf(2))])
        .unwrap();
    assert_leaves(&mapping, &[("a.b", 1), ("a.c", 2)]);

    // Stops at the first failing pair, keeping what was applied before it
    let err = mapping
        .try_extend([
            ("d", Node::leaf(3)),
            ("a.b.x", Node::leaf(4)),
            ("e", Node::leaf(5)),
        ])
        .unwrap_err();
    assert!(err.is_conflict());
    assert!(mapping.contains_key("d"));
    assert!(!mapping.contains_key("e"));
}

#[test]
fn test_lifecycle() {
    let mut mapping: DottedMapping<TreeSection<i64>> = DottedMapping::default();
    assert!(!mapping.is_initialized());
    assert_eq!(mapping.set_leaf("a", 1), Err(MappingError::Uninitialized));
    assert!(mapping.base().is_none());

    mapping.init(TreeSection::new()).unwrap();
    mapping.set_leaf("a", 1).unwrap();
    assert_eq!(
        mapping.init(TreeSection::new()),
        Err(MappingError::AlreadyInitialized)
    );
    // The existing base survives a rejected init
    assert_eq!(mapping.get_leaf("a").unwrap(), &1);

    let base = mapping.into_base().unwrap();
    assert_eq!(base.len(), 1);
}

#[test]
fn test_with_base_and_base_mut() {
    let mut base = TreeSection::new();
    base.insert_node("k".to_string(), Node::leaf(5));

    let mut mapping = DottedMapping::with_base(base);
    assert_eq!(mapping.get_leaf("k").unwrap(), &5);

    mapping.base_mut().unwrap().remove_node("k");
    assert!(mapping.is_empty());
}

#[test]
fn test_hash_backed_mapping() {
    let mut mapping = HashMapping::empty();
    for (i, key) in sample_keys().into_iter().enumerate() {
        mapping.set_leaf(key, i as i64).unwrap();
    }

    assert_eq!(mapping.len(), sample_keys().len());
    for (i, key) in sample_keys().into_iter().enumerate() {
        assert_eq!(mapping.get_leaf(key).unwrap(), &(i as i64));
    }
}
