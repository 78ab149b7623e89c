//! Integration tests for FieldPath.

use verdict::{FieldPath, PathError, PathSegment};

#[test]
fn test_path_construction_and_display() {
    assert_eq!(FieldPath::field("name").to_string(), "name");
    assert_eq!(FieldPath::index(0).to_string(), "[0]");

    let path = FieldPath::field("users")
        .push_index(0)
        .push_field("address")
        .push_field("city");
    assert_eq!(path.to_string(), "users[0].address.city");
}

#[test]
fn test_path_segments_preserved() {
    let path = FieldPath::field("data").push_index(42).push_field("value");

    let segments: Vec<&PathSegment> = path.segments().collect();
    assert_eq!(segments.len(), 3);

    match &segments[0] {
        PathSegment::Field(name) => assert_eq!(name, "data"),
        _ => panic!("Expected Field segment"),
    }

    match &segments[1] {
        PathSegment::Index(idx) => assert_eq!(*idx, 42),
        _ => panic!("Expected Index segment"),
    }

    match &segments[2] {
        PathSegment::Field(name) => assert_eq!(name, "value"),
        _ => panic!("Expected Field segment"),
    }
}

#[test]
fn test_path_is_immutable() {
    let base = FieldPath::field("items");

    let path1 = base.push_index(0);
    let path2 = base.push_index(1);
    let path3 = base.push_field("count");

    assert_eq!(base.to_string(), "items");
    assert_eq!(path1.to_string(), "items[0]");
    assert_eq!(path2.to_string(), "items[1]");
    assert_eq!(path3.to_string(), "items.count");
}

#[test]
fn test_path_equality() {
    let path1 = FieldPath::field("a").push_index(0);
    let path2 = FieldPath::field("a").push_index(0);
    let path3 = FieldPath::field("a").push_index(1);
    let path4 = FieldPath::field("b").push_index(0);

    assert_eq!(path1, path2);
    assert_ne!(path1, path3);
    assert_ne!(path1, path4);
}

#[test]
fn test_join_nests_arbitrarily_deep() {
    let inner = FieldPath::field("c").push_index(2);
    let middle = FieldPath::field("b").join(&inner);
    let outer = FieldPath::field("a").join(&middle);

    assert_eq!(outer.to_string(), "a.b.c[2]");
    assert_eq!(outer.len(), 4);
    assert!(outer.starts_with(&FieldPath::field("a").push_field("b")));
}

#[test]
fn test_consecutive_indices() {
    let path = FieldPath::index(0).push_index(1).push_index(2);
    assert_eq!(path.to_string(), "[0][1][2]");
}

#[test]
fn test_path_hash() {
    use std::collections::HashSet;

    let mut set = HashSet::new();
    set.insert(FieldPath::field("a"));
    set.insert(FieldPath::field("b"));
    set.insert(FieldPath::field("a"));

    assert_eq!(set.len(), 2);
}

#[test]
fn test_paths_sort_structurally() {
    let mut paths = vec![
        FieldPath::field("b"),
        FieldPath::field("a").push_index(1),
        FieldPath::field("a"),
        FieldPath::field("a").push_index(0),
    ];
    paths.sort();

    let rendered: Vec<_> = paths.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["a", "a[0]", "a[1]", "b"]);
}

#[test]
fn test_parse_display_round_trip() {
    let path = FieldPath::field("orders")
        .push_index(3)
        .push_field("lines")
        .push_index(0)
        .push_field("sku");

    let parsed: FieldPath = path.to_string().parse().unwrap();
    assert_eq!(parsed, path);
}

#[test]
fn test_parse_rejects_malformed_paths() {
    assert_eq!("".parse::<FieldPath>(), Err(PathError::Empty));
    assert!(matches!("a.".parse::<FieldPath>(), Err(PathError::EmptySegment(1))));
    assert!(matches!("a[1".parse::<FieldPath>(), Err(PathError::UnclosedIndex(_))));
    assert!(matches!("a[-1]".parse::<FieldPath>(), Err(PathError::InvalidIndex(_))));
}

#[test]
fn test_path_error_messages() {
    assert_eq!(PathError::Empty.to_string(), "field path is empty");
    assert_eq!(
        PathError::InvalidIndex("x".to_string()).to_string(),
        "invalid index 'x'"
    );
}
