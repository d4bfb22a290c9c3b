use pathquill::target::Value;
use pathquill::{Mutator, PathError, WriteMode};
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn test_round_trip_literal_paths() {
    let cases = [
        ("name", Value::from("Alice")),
        ("profile.age", Value::from(30)),
        ("items.0", Value::from(true)),
        ("deep.list.0.score", Value::from(1.5)),
        ("nothing", Value::Null),
    ];
    for (path, expected) in cases {
        let mut data = value(json!({}));
        pathquill::set(&mut data, path, expected.clone()).unwrap();
        assert_eq!(
            pathquill::get(&data, path, Value::from("missing")).unwrap(),
            expected,
            "path {}",
            path
        );
    }
}

#[test]
fn test_merge_is_idempotent() {
    let mut once = value(json!({"cfg": {"a": 1, "nested": {"x": 1}}}));
    let patch = value(json!({"nested": {"y": 2}, "b": 3}));
    pathquill::merge(&mut once, "cfg", patch.clone()).unwrap();

    let mut twice = once.clone();
    pathquill::merge(&mut twice, "cfg", patch).unwrap();

    assert_eq!(once, twice);
    assert_eq!(
        once,
        value(json!({"cfg": {"a": 1, "nested": {"x": 1, "y": 2}, "b": 3}}))
    );
}

#[test]
fn test_numeric_merge_replaces_by_position() {
    let mut data = value(json!({"tags": ["old", "keep"]}));
    pathquill::merge(&mut data, "tags", value(json!(["new"]))).unwrap();
    assert_eq!(data, value(json!({"tags": ["new", "keep"]})));
}

#[test]
fn test_set_overwrite_replaces_container() {
    let mut data = value(json!({"tags": ["old", "keep"]}));
    pathquill::set(&mut data, "tags", value(json!(["new"]))).unwrap();
    assert_eq!(data, value(json!({"tags": ["new"]})));
}

#[test]
fn test_deep_wildcard_unset_clears_leaves() {
    let mut data = value(json!({
        "users": [
            {"profile": {"city": "Berlin"}},
            {"profile": {"city": "Munich"}}
        ]
    }));
    pathquill::unset(&mut data, "users.*.profile.city").unwrap();
    assert_eq!(
        data,
        value(json!({"users": [{"profile": {}}, {"profile": {}}]}))
    );
}

#[test]
fn test_trailing_wildcard_unset_clears_collection() {
    let mut data = value(json!({
        "users": [
            {"profile": {"city": "Berlin"}},
            {"profile": {"city": "Munich"}}
        ]
    }));
    pathquill::unset(&mut data, "users.*").unwrap();
    assert_eq!(data, value(json!({"users": []})));
}

#[test]
fn test_unset_missing_path_is_noop() {
    let mut data = value(json!({"a": {"b": 1}}));
    pathquill::unset(&mut data, "a.c.d").unwrap();
    pathquill::unset(&mut data, "x").unwrap();
    assert_eq!(data, value(json!({"a": {"b": 1}})));
}

#[test]
fn test_syntax_rejection_leaves_target_unchanged() {
    let mut data = value(json!({"a": {"b": 1}}));
    let before = data.clone();

    for path in ["a..b", ".a", "a.", "a.b*"] {
        let err = pathquill::set(&mut data, path, Value::from(2)).unwrap_err();
        assert!(
            matches!(err, PathError::InvalidPathSyntax { .. }),
            "path {}",
            path
        );
    }
    assert_eq!(data, before);
}

#[test]
fn test_scalar_promotion() {
    let mut data = value(json!({"user": "scalar"}));
    pathquill::set(&mut data, "user.name", Value::from("Alice")).unwrap();
    assert_eq!(data, value(json!({"user": {"name": "Alice"}})));
}

#[test]
fn test_end_to_end_batch_set() {
    let mut data = value(json!({}));
    pathquill::set_many(
        &mut data,
        [
            ("users.0.name", Value::from("Alice")),
            ("users.1.name", Value::from("Bob")),
            ("users.1.age", Value::from(25)),
        ],
    )
    .unwrap();
    assert_eq!(
        data,
        value(json!({"users": [{"name": "Alice"}, {"name": "Bob", "age": 25}]}))
    );
}

#[test]
fn test_batch_with_bad_path_writes_nothing() {
    let mut data = value(json!({}));
    let err = pathquill::set_many(
        &mut data,
        [
            ("users.0.name", Value::from("Alice")),
            ("users..name", Value::from("Bob")),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, PathError::InvalidPathSyntax { .. }));
    assert_eq!(data, value(json!({})));
}

#[test]
fn test_wildcard_set_touches_every_element() {
    let mut data = value(json!({"items": [{"qty": 1}, {"qty": 2}]}));
    pathquill::set(&mut data, "items.*.qty", Value::from(0)).unwrap();
    assert_eq!(data, value(json!({"items": [{"qty": 0}, {"qty": 0}]})));
}

#[test]
fn test_merge_mode_through_set_with() {
    let mut data = value(json!({"a": {"x": 1}}));
    Mutator::new(&mut data)
        .set_with("a", value(json!({"y": 2})), WriteMode::Merge)
        .unwrap();
    assert_eq!(data, value(json!({"a": {"x": 1, "y": 2}})));
}

#[test]
fn test_scalar_root_is_unsupported() {
    let mut data = Value::from("text");
    let err = pathquill::set(&mut data, "a", Value::from(1)).unwrap_err();
    assert!(matches!(err, PathError::UnsupportedTargetType { .. }));
    assert_eq!(data, Value::from("text"));
}

#[test]
fn test_empty_path_is_noop() {
    let mut data = value(json!({"a": 1}));
    pathquill::set(&mut data, "", Value::from(2)).unwrap();
    pathquill::unset(&mut data, "").unwrap();
    assert_eq!(data, value(json!({"a": 1})));
}

#[test]
fn test_unset_many() {
    let mut data = value(json!({"a": 1, "b": 2, "c": 3}));
    pathquill::unset_many(&mut data, ["a", "c"]).unwrap();
    assert_eq!(data, value(json!({"b": 2})));
}

#[test]
fn test_deep_wildcard_set() {
    let mut data = value(json!({
        "teams": [
            {"members": [{"id": 1}, {"id": 2}]},
            {"members": []},
            {"members": [{"id": 3}]}
        ]
    }));
    pathquill::set(&mut data, "teams.*.members.*.active", Value::from(true)).unwrap();
    assert_eq!(
        data,
        value(json!({
            "teams": [
                {"members": [{"id": 1, "active": true}, {"id": 2, "active": true}]},
                {"members": []},
                {"members": [{"id": 3, "active": true}]}
            ]
        }))
    );
}

#[test]
fn test_deep_wildcard_unset_leaf() {
    let mut data = value(json!({
        "teams": [
            {"members": [{"id": 1, "tmp": "x"}, {"id": 2}]},
            {"members": [{"id": 3, "tmp": "y"}]}
        ]
    }));
    pathquill::unset(&mut data, "teams.*.members.*.tmp").unwrap();
    assert_eq!(
        data,
        value(json!({
            "teams": [
                {"members": [{"id": 1}, {"id": 2}]},
                {"members": [{"id": 3}]}
            ]
        }))
    );
}

#[test]
fn test_deep_wildcard_unset_trailing_clears_each_level() {
    let mut data = value(json!({
        "teams": [
            {"name": "a", "members": [{"id": 1}, {"id": 2}]},
            {"name": "b", "members": [{"id": 3}]}
        ]
    }));
    pathquill::unset(&mut data, "teams.*.members.*").unwrap();
    assert_eq!(
        data,
        value(json!({
            "teams": [
                {"name": "a", "members": []},
                {"name": "b", "members": []}
            ]
        }))
    );
}

#[test]
fn test_wildcard_merge() {
    let mut data = value(json!({
        "users": [
            {"name": "Alice", "prefs": {"theme": "dark"}},
            {"name": "Bob"}
        ]
    }));
    pathquill::merge(
        &mut data,
        "users.*",
        value(json!({"prefs": {"lang": "en"}, "active": true})),
    )
    .unwrap();
    assert_eq!(
        data,
        value(json!({
            "users": [
                {"name": "Alice", "prefs": {"theme": "dark", "lang": "en"}, "active": true},
                {"name": "Bob", "prefs": {"lang": "en"}, "active": true}
            ]
        }))
    );
}

#[test]
fn test_wildcard_over_mixed_elements() {
    let mut data = value(json!({"items": [{"n": 1}, "plain", null, {"n": 2}]}));
    pathquill::merge(&mut data, "items.*", value(json!({"seen": true}))).unwrap();
    assert_eq!(
        data,
        value(json!({"items": [
            {"n": 1, "seen": true},
            {"seen": true},
            {"seen": true},
            {"n": 2, "seen": true}
        ]}))
    );

    let mut data = value(json!({"items": [{"n": 1}, "plain", {"n": 2}]}));
    pathquill::unset(&mut data, "items.*.n").unwrap();
    assert_eq!(data, value(json!({"items": [{}, "plain", {}]})));
}

#[test]
fn test_wildcard_set_is_not_retroactive() {
    use pathquill::target::{ArrayCollection, Collection, CollectionRef};
    use std::cell::RefCell;
    use std::rc::Rc;

    // Element 0 is the collection itself, so writing `0.1` appends a sibling
    // of the element the wildcard is visiting.
    let list = Rc::new(RefCell::new(ArrayCollection::new()));
    let handle = Value::Collection(CollectionRef::from_rc(list.clone()));
    list.borrow_mut().push(handle.clone());

    let mut data = Value::mapping([("list", handle)]);
    pathquill::set(&mut data, "list.*.1", Value::from("added")).unwrap();

    {
        let list = list.borrow();
        assert_eq!(list.keys(), vec!["0", "1"]);
        assert_eq!(list.get("1"), Some(Value::from("added")));
    }
    list.borrow_mut().clear();
}
