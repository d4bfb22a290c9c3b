//! Adapter for snapshot-only wrappers.
//!
//! Reads see the wrapper's plain data. Any write first replaces the wrapper
//! with that plain data, then delegates to the plain container's adapter, so
//! the caller gets a plain mapping or sequence back instead of the wrapper.

use super::{adapter_for, SlotOp, TargetAdapter};
use crate::dotpath::error::Result;
use crate::target::Value;
use std::borrow::Cow;

pub struct SnapshotAdapter;

fn plain(node: &Value) -> Option<Value> {
    match node {
        Value::Snapshot(snapshot) => Some(snapshot.to_plain()),
        _ => None,
    }
}

/// Materializes `node` and returns the adapter for the result.
fn materialized(node: &mut Value) -> Option<&'static dyn TargetAdapter> {
    node.materialize();
    adapter_for(node).filter(|adapter| adapter.name() != "snapshot")
}

impl TargetAdapter for SnapshotAdapter {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn has(&self, node: &Value, key: &str) -> bool {
        plain(node).is_some_and(|data| adapter_for(&data).is_some_and(|a| a.has(&data, key)))
    }

    fn read<'a>(&self, node: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
        let data = plain(node)?;
        let adapter = adapter_for(&data)?;
        adapter
            .read(&data, key)
            .map(|child| Cow::Owned(child.into_owned()))
    }

    fn write(&self, node: &mut Value, key: &str, value: Value) -> Result<()> {
        match materialized(node) {
            Some(adapter) => adapter.write(node, key, value),
            None => Ok(()),
        }
    }

    fn remove(&self, node: &mut Value, key: &str) -> Result<()> {
        match materialized(node) {
            Some(adapter) => adapter.remove(node, key),
            None => Ok(()),
        }
    }

    fn clear(&self, node: &mut Value) -> Result<()> {
        match materialized(node) {
            Some(adapter) => adapter.clear(node),
            None => Ok(()),
        }
    }

    fn keys(&self, node: &Value) -> Vec<String> {
        plain(node)
            .and_then(|data| adapter_for(&data).map(|a| a.keys(&data)))
            .unwrap_or_default()
    }

    fn update(&self, node: &mut Value, key: &str, op: &mut SlotOp<'_>) -> Result<()> {
        match materialized(node) {
            Some(adapter) => adapter.update(node, key, op),
            None => Ok(()),
        }
    }
}
