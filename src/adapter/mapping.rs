//! Adapter for ordered key-value mappings.

use super::{SlotOp, TargetAdapter};
use crate::dotpath::error::Result;
use crate::target::Value;
use std::borrow::Cow;

pub struct MappingAdapter;

impl TargetAdapter for MappingAdapter {
    fn name(&self) -> &'static str {
        "mapping"
    }

    fn has(&self, node: &Value, key: &str) -> bool {
        matches!(node, Value::Mapping(map) if map.contains_key(key))
    }

    fn read<'a>(&self, node: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
        match node {
            Value::Mapping(map) => map.get(key).map(Cow::Borrowed),
            _ => None,
        }
    }

    fn write(&self, node: &mut Value, key: &str, value: Value) -> Result<()> {
        if let Value::Mapping(map) = node {
            // An existing key keeps its position.
            map.insert(key.to_string(), value);
        }
        Ok(())
    }

    fn remove(&self, node: &mut Value, key: &str) -> Result<()> {
        if let Value::Mapping(map) = node {
            map.shift_remove(key);
        }
        Ok(())
    }

    fn clear(&self, node: &mut Value) -> Result<()> {
        if let Value::Mapping(map) = node {
            map.clear();
        }
        Ok(())
    }

    fn keys(&self, node: &Value) -> Vec<String> {
        match node {
            Value::Mapping(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn update(&self, node: &mut Value, key: &str, op: &mut SlotOp<'_>) -> Result<()> {
        match node {
            Value::Mapping(map) => {
                let slot = map.entry(key.to_string()).or_insert(Value::Null);
                op(slot)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        Value::mapping([("b", Value::from(1)), ("a", Value::from(2))])
    }

    #[test]
    fn test_read_and_has() {
        let node = sample();
        assert!(MappingAdapter.has(&node, "a"));
        assert!(!MappingAdapter.has(&node, "c"));
        assert_eq!(
            MappingAdapter.read(&node, "b").map(Cow::into_owned),
            Some(Value::from(1))
        );
    }

    #[test]
    fn test_write_keeps_position_of_existing_key() {
        let mut node = sample();
        MappingAdapter.write(&mut node, "b", Value::from(9)).unwrap();
        MappingAdapter.write(&mut node, "c", Value::from(3)).unwrap();
        assert_eq!(MappingAdapter.keys(&node), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut node = Value::mapping([
            ("x", Value::from(1)),
            ("y", Value::from(2)),
            ("z", Value::from(3)),
        ]);
        MappingAdapter.remove(&mut node, "y").unwrap();
        assert_eq!(MappingAdapter.keys(&node), vec!["x", "z"]);
    }

    #[test]
    fn test_update_creates_missing_slot() {
        let mut node = sample();
        MappingAdapter
            .update(&mut node, "new", &mut |slot| {
                assert!(slot.is_null());
                *slot = Value::from("created");
                Ok(())
            })
            .unwrap();
        assert_eq!(node.as_mapping().unwrap()["new"], Value::from("created"));
    }
}
