//! Adapter for integer-indexed sequences.
//!
//! Keys are decimal positions. Writing at `len` appends; writing past the end,
//! or under a non-numeric key, turns the sequence into a mapping keyed by the
//! existing positions, so no data is lost and no gaps are invented.

use super::mapping::MappingAdapter;
use super::{SlotOp, TargetAdapter};
use crate::dotpath::ast::parse_index;
use crate::dotpath::error::Result;
use crate::target::{Mapping, Value};
use std::borrow::Cow;

pub struct SequenceAdapter;

/// Replaces a sequence with a mapping keyed `"0".."n-1"`.
pub(crate) fn promote_to_mapping(node: &mut Value) {
    if let Value::Sequence(items) = node {
        let map: Mapping = std::mem::take(items)
            .into_iter()
            .enumerate()
            .map(|(i, item)| (i.to_string(), item))
            .collect();
        tracing::debug!(len = map.len(), "promoting sequence to mapping");
        *node = Value::Mapping(map);
    }
}

fn position(node: &Value, key: &str) -> Option<usize> {
    match node {
        Value::Sequence(items) => parse_index(key).filter(|&i| i < items.len()),
        _ => None,
    }
}

impl TargetAdapter for SequenceAdapter {
    fn name(&self) -> &'static str {
        "sequence"
    }

    fn has(&self, node: &Value, key: &str) -> bool {
        position(node, key).is_some()
    }

    fn read<'a>(&self, node: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
        match node {
            Value::Sequence(items) => parse_index(key)
                .and_then(|i| items.get(i))
                .map(Cow::Borrowed),
            _ => None,
        }
    }

    fn write(&self, node: &mut Value, key: &str, value: Value) -> Result<()> {
        let Value::Sequence(items) = node else {
            return Ok(());
        };
        match parse_index(key) {
            Some(i) if i < items.len() => items[i] = value,
            Some(i) if i == items.len() => items.push(value),
            _ => {
                promote_to_mapping(node);
                return MappingAdapter.write(node, key, value);
            }
        }
        Ok(())
    }

    fn remove(&self, node: &mut Value, key: &str) -> Result<()> {
        if let Some(i) = position(node, key) {
            if let Value::Sequence(items) = node {
                items.remove(i);
            }
        }
        Ok(())
    }

    fn clear(&self, node: &mut Value) -> Result<()> {
        if let Value::Sequence(items) = node {
            items.clear();
        }
        Ok(())
    }

    fn keys(&self, node: &Value) -> Vec<String> {
        match node {
            Value::Sequence(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            _ => Vec::new(),
        }
    }

    fn update(&self, node: &mut Value, key: &str, op: &mut SlotOp<'_>) -> Result<()> {
        let Value::Sequence(items) = node else {
            return Ok(());
        };
        match parse_index(key) {
            Some(i) if i < items.len() => op(&mut items[i]),
            Some(i) if i == items.len() => {
                items.push(Value::Null);
                op(&mut items[i])
            }
            _ => {
                promote_to_mapping(node);
                MappingAdapter.update(node, key, op)
            }
        }
    }
}
