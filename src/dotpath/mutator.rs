//! Write traversal: set, merge and unset.

use super::accessor::check_root;
use super::ast::{parse_index, DotPath, Segment};
use super::error::Result;
use super::expander::WildcardExpander;
use super::parser::Parser;
use crate::adapter::adapter_for;
use crate::target::{Mapping, NodeKind, Value};
use std::cmp::Ordering;

/// How a write combines with what is already at the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace the existing value.
    #[default]
    Overwrite,
    /// Combine containers: mappings deep-merge by key, sequences replace by
    /// position. Anything else falls back to overwrite.
    Merge,
}

/// Applies writes to a mutably borrowed root.
///
/// Every path is parsed before the root is touched, so a syntax error leaves
/// the target exactly as it was.
pub struct Mutator<'a> {
    root: &'a mut Value,
}

impl<'a> Mutator<'a> {
    pub fn new(root: &'a mut Value) -> Self {
        Mutator { root }
    }

    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        self.set_with(path, value, WriteMode::Overwrite)
    }

    pub fn merge(&mut self, path: &str, value: Value) -> Result<()> {
        self.set_with(path, value, WriteMode::Merge)
    }

    pub fn set_with(&mut self, path: &str, value: Value, mode: WriteMode) -> Result<()> {
        let path = Parser::parse(path)?;
        check_root(self.root, &path)?;
        self.apply_set(&path, &value, mode)
    }

    /// Applies `entries` in order; a later entry for the same path wins.
    pub fn set_many<I, K>(&mut self, entries: I, mode: WriteMode) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let parsed = entries
            .into_iter()
            .map(|(path, value)| Ok((Parser::parse(path.as_ref())?, value)))
            .collect::<Result<Vec<_>>>()?;
        for (path, _) in &parsed {
            check_root(self.root, path)?;
        }
        for (path, value) in &parsed {
            self.apply_set(path, value, mode)?;
        }
        Ok(())
    }

    /// Removes the value at `path`. Missing paths are a no-op.
    ///
    /// A trailing wildcard empties the collection it stands on; a wildcard in
    /// the middle removes the remaining path from each match.
    pub fn unset(&mut self, path: &str) -> Result<()> {
        self.unset_many([path])
    }

    /// Removes every path in one pass.
    ///
    /// All paths address the target as it was when the call started: matches
    /// are resolved first, then removed from the last position backwards, so
    /// `["items.0", "items.1"]` drops the first two elements.
    pub fn unset_many<I, S>(&mut self, paths: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = Parser::parse_all(paths)?;
        for path in &parsed {
            check_root(self.root, path)?;
        }
        if parsed.iter().all(DotPath::is_identity) {
            return Ok(());
        }
        self.root.materialize();

        let mut removals = Vec::new();
        for path in parsed.iter().filter(|path| !path.is_identity()) {
            tracing::debug!(path = %path, "unset");
            removals.extend(Removal::resolve(self.root, &path.segments));
        }
        removals.sort_by(|a, b| b.cmp_position(a));
        removals.dedup();

        for removal in &removals {
            remove_at(self.root, &removal.keys, removal.clear)?;
        }
        Ok(())
    }

    fn apply_set(&mut self, path: &DotPath, value: &Value, mode: WriteMode) -> Result<()> {
        if path.is_identity() {
            return Ok(());
        }
        tracing::debug!(path = %path, ?mode, "set");
        self.root.materialize();
        set_at(self.root, &path.segments, value, mode)
    }
}

/// Fresh container for a scalar standing where `next` must descend.
fn container_for(next: &Segment) -> Value {
    match next {
        Segment::Literal(_) if next.as_index().is_some() => Value::Sequence(Vec::new()),
        Segment::Literal(_) => Value::Mapping(Mapping::new()),
        Segment::Wildcard => Value::Sequence(Vec::new()),
    }
}

/// Writes `value` at `segments` below `node`.
///
/// Null and scalar intermediates are replaced by a fresh container, except
/// that a wildcard skips a non-null scalar: it has nothing to match there.
fn set_at(node: &mut Value, segments: &[Segment], value: &Value, mode: WriteMode) -> Result<()> {
    let Some((segment, rest)) = segments.split_first() else {
        match mode {
            WriteMode::Overwrite => *node = value.clone(),
            WriteMode::Merge => merge_into(node, value.clone()),
        }
        return Ok(());
    };

    if node.kind() == NodeKind::Scalar {
        if segment.is_wildcard() && !node.is_null() {
            tracing::trace!(kind = %node.kind(), "wildcard skips scalar");
            return Ok(());
        }
        *node = container_for(segment);
    }
    let Some(adapter) = adapter_for(node) else {
        return Ok(());
    };

    match segment {
        Segment::Literal(key) => {
            adapter.update(node, key, &mut |child| set_at(child, rest, value, mode))
        }
        Segment::Wildcard => {
            for key in WildcardExpander::keys(node) {
                adapter.update(node, &key, &mut |child| set_at(child, rest, value, mode))?;
            }
            Ok(())
        }
    }
}

/// A concrete removal: drop the value at `keys`, or empty the container
/// there when `clear` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Removal {
    keys: Vec<String>,
    clear: bool,
}

impl Removal {
    /// Expands `segments` against the current state of `root`.
    ///
    /// A trailing wildcard becomes one `clear` of each matching parent; every
    /// other wildcard fans out to the keys that exist right now.
    fn resolve(root: &Value, segments: &[Segment]) -> Vec<Removal> {
        let (prefix, clear) = match segments.split_last() {
            Some((Segment::Wildcard, prefix)) => (prefix, true),
            _ => (segments, false),
        };
        WildcardExpander::expand(root, prefix)
            .into_iter()
            .map(|keys| Removal { keys, clear })
            .collect()
    }

    /// Orders by key path, comparing sequence positions numerically. A path
    /// sorts before its own descendants.
    fn cmp_position(&self, other: &Removal) -> Ordering {
        for (a, b) in self.keys.iter().zip(&other.keys) {
            let ord = match (parse_index(a), parse_index(b)) {
                (Some(i), Some(j)) => i.cmp(&j),
                _ => a.cmp(b),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        self.keys
            .len()
            .cmp(&other.keys.len())
            .then(self.clear.cmp(&other.clear))
    }
}

fn remove_at(node: &mut Value, keys: &[String], clear: bool) -> Result<()> {
    let Some(adapter) = adapter_for(node) else {
        return Ok(());
    };

    match keys.split_first() {
        None if clear => adapter.clear(node),
        None => Ok(()),
        Some((key, [])) if !clear => adapter.remove(node, key),
        Some((key, rest)) => {
            if !adapter.has(node, key) {
                return Ok(());
            }
            adapter.update(node, key, &mut |child| remove_at(child, rest, clear))
        }
    }
}

/// Merges `incoming` into `existing`.
///
/// Mappings recurse per key and gain new keys. Sequences replace elements by
/// position without recursing; the existing length never changes, so
/// positions past its end are ignored.
pub fn merge_into(existing: &mut Value, incoming: Value) {
    existing.materialize();
    let incoming = match incoming {
        Value::Snapshot(snapshot) => snapshot.to_plain(),
        other => other,
    };

    match (existing, incoming) {
        (Value::Mapping(base), Value::Mapping(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (Value::Sequence(base), Value::Sequence(layer)) => {
            if layer.len() > base.len() {
                tracing::debug!(
                    existing = base.len(),
                    incoming = layer.len(),
                    "sequence merge ignores positions past the end"
                );
            }
            for (slot, value) in base.iter_mut().zip(layer) {
                *slot = value;
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dotpath::error::PathError;
    use serde_json::json;

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_set_creates_intermediate_mappings() {
        let mut root = value(json!({}));
        Mutator::new(&mut root).set("a.b.c", Value::from(1)).unwrap();
        assert_eq!(root, value(json!({"a": {"b": {"c": 1}}})));
    }

    #[test]
    fn test_set_numeric_segment_creates_sequence() {
        let mut root = value(json!({}));
        Mutator::new(&mut root).set("items.0", Value::from("x")).unwrap();
        assert_eq!(root, value(json!({"items": ["x"]})));
    }

    #[test]
    fn test_set_promotes_scalar_intermediate() {
        let mut root = value(json!({"user": "scalar"}));
        Mutator::new(&mut root).set("user.name", Value::from("Alice")).unwrap();
        assert_eq!(root, value(json!({"user": {"name": "Alice"}})));
    }

    #[test]
    fn test_set_wildcard_applies_to_existing_only() {
        let mut root = value(json!({"users": [{"n": 1}, {"n": 2}]}));
        Mutator::new(&mut root).set("users.*.active", Value::from(true)).unwrap();
        assert_eq!(
            root,
            value(json!({"users": [{"n": 1, "active": true}, {"n": 2, "active": true}]}))
        );
    }

    #[test]
    fn test_set_wildcard_over_missing_creates_nothing_to_match() {
        let mut root = value(json!({}));
        Mutator::new(&mut root).set("users.*.name", Value::from("x")).unwrap();
        assert_eq!(root, value(json!({"users": []})));
    }

    #[test]
    fn test_merge_mapping_is_deep() {
        let mut root = value(json!({"cfg": {"db": {"host": "a", "port": 1}, "debug": false}}));
        Mutator::new(&mut root)
            .merge("cfg", value(json!({"db": {"port": 2}, "cache": true})))
            .unwrap();
        assert_eq!(
            root,
            value(json!({"cfg": {"db": {"host": "a", "port": 2}, "debug": false, "cache": true}}))
        );
    }

    #[test]
    fn test_merge_sequence_replaces_by_position() {
        let mut root = value(json!({"tags": ["old", "keep"]}));
        Mutator::new(&mut root).merge("tags", value(json!(["new"]))).unwrap();
        assert_eq!(root, value(json!({"tags": ["new", "keep"]})));
    }

    #[test]
    fn test_merge_sequence_elements_are_replaced_not_merged() {
        let mut root = value(json!({"items": [{"a": 1, "b": 2}]}));
        Mutator::new(&mut root).merge("items", value(json!([{"a": 9}]))).unwrap();
        assert_eq!(root, value(json!({"items": [{"a": 9}]})));
    }

    #[test]
    fn test_merge_sequence_keeps_existing_length() {
        let mut root = value(json!({"tags": ["a"]}));
        Mutator::new(&mut root).merge("tags", value(json!(["x", "y", "z"]))).unwrap();
        assert_eq!(root, value(json!({"tags": ["x"]})));
    }

    #[test]
    fn test_merge_mismatched_kinds_overwrites() {
        let mut root = value(json!({"a": [1, 2], "b": "s"}));
        let mut mutator = Mutator::new(&mut root);
        mutator.merge("a", value(json!({"x": 1}))).unwrap();
        mutator.merge("b", value(json!({"y": 2}))).unwrap();
        assert_eq!(root, value(json!({"a": {"x": 1}, "b": {"y": 2}})));
    }

    #[test]
    fn test_unset_trailing_wildcard_clears() {
        let mut root = value(json!({"users": [{"a": 1}, {"a": 2}], "keep": 1}));
        Mutator::new(&mut root).unset("users.*").unwrap();
        assert_eq!(root, value(json!({"users": [], "keep": 1})));
    }

    #[test]
    fn test_unset_inner_wildcard_removes_leaf_only() {
        let mut root = value(json!({"users": [{"a": 1, "b": 2}, {"b": 3}]}));
        Mutator::new(&mut root).unset("users.*.b").unwrap();
        assert_eq!(root, value(json!({"users": [{"a": 1}, {}]})));
    }

    #[test]
    fn test_unset_many_addresses_original_positions() {
        let mut root = value(json!({"items": ["a", "b", "c"]}));
        Mutator::new(&mut root).unset_many(["items.0", "items.1"]).unwrap();
        assert_eq!(root, value(json!({"items": ["c"]})));
    }

    #[test]
    fn test_unset_many_orders_positions_numerically() {
        let items: Vec<i64> = (0..12).collect();
        let mut root = value(json!({ "items": items }));
        Mutator::new(&mut root)
            .unset_many(["items.2", "items.10", "items.0.x", "items.2"])
            .unwrap();
        assert_eq!(
            root,
            value(json!({"items": [0, 1, 3, 4, 5, 6, 7, 8, 9, 11]}))
        );
    }

    #[test]
    fn test_unset_many_leaf_and_clear_in_one_batch() {
        let mut root = value(json!({"a": [{"x": 1, "y": 2}], "b": [1, 2]}));
        Mutator::new(&mut root).unset_many(["a.0.x", "b.*", "b.0"]).unwrap();
        assert_eq!(root, value(json!({"a": [{"y": 2}], "b": []})));
    }

    #[test]
    fn test_wildcard_set_skips_scalar_siblings() {
        let mut root = value(json!({"a": {"x": {"b": [{"c": 1}]}, "y": {"b": "s"}}}));
        Mutator::new(&mut root).set("a.*.b.*.c", Value::from(0)).unwrap();
        assert_eq!(
            root,
            value(json!({"a": {"x": {"b": [{"c": 0}]}, "y": {"b": "s"}}}))
        );
    }

    #[test]
    fn test_unset_missing_is_noop() {
        let mut root = value(json!({"a": {"b": 1}}));
        Mutator::new(&mut root).unset_many(["a.c", "x.y.z", "a.b.c"]).unwrap();
        assert_eq!(root, value(json!({"a": {"b": 1}})));
    }

    #[test]
    fn test_syntax_error_leaves_target_untouched() {
        let mut root = value(json!({"a": 1}));
        let err = Mutator::new(&mut root)
            .set_many([("b", Value::from(2)), ("c..d", Value::from(3))], WriteMode::Overwrite)
            .unwrap_err();
        assert!(matches!(err, PathError::InvalidPathSyntax { .. }));
        assert_eq!(root, value(json!({"a": 1})));
    }

    #[test]
    fn test_empty_path_is_noop() {
        let mut root = value(json!({"a": 1}));
        let mut mutator = Mutator::new(&mut root);
        mutator.set("", Value::from(2)).unwrap();
        mutator.unset("").unwrap();
        assert_eq!(root, value(json!({"a": 1})));
    }

    #[test]
    fn test_scalar_root_is_unsupported() {
        let mut root = Value::from(5);
        let err = Mutator::new(&mut root).set("a", Value::from(1)).unwrap_err();
        assert!(matches!(err, PathError::UnsupportedTargetType { .. }));
        assert_eq!(root, Value::from(5));
    }
}
