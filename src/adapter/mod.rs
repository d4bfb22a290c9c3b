//! Per-node-kind access capabilities.
//!
//! Traversal never inspects a container directly: it asks [`adapter_for`] for
//! the [`TargetAdapter`] matching the node's shape and goes through
//! `has`/`read`/`write`/`remove`/`keys`. New container kinds plug in by
//! implementing [`Record`](crate::target::Record),
//! [`Collection`](crate::target::Collection) or
//! [`ToPlain`](crate::target::ToPlain), not by touching the traversal code.

pub mod collection;
pub mod mapping;
pub mod object;
pub mod sequence;
pub mod snapshot;

use crate::dotpath::error::Result;
use crate::target::Value;
use std::borrow::Cow;

pub use collection::CollectionAdapter;
pub use mapping::MappingAdapter;
pub use object::ObjectAdapter;
pub use sequence::SequenceAdapter;
pub use snapshot::SnapshotAdapter;

/// Operation applied to a child slot by [`TargetAdapter::update`].
pub type SlotOp<'a> = dyn FnMut(&mut Value) -> Result<()> + 'a;

/// Key-level access to one kind of container.
///
/// Value-semantics containers are changed in the caller's `&mut Value`;
/// reference-semantics handles are mutated behind the shared handle.
pub trait TargetAdapter {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn has(&self, node: &Value, key: &str) -> bool;

    fn read<'a>(&self, node: &'a Value, key: &str) -> Option<Cow<'a, Value>>;

    fn write(&self, node: &mut Value, key: &str, value: Value) -> Result<()>;

    /// Removes `key` if present.
    fn remove(&self, node: &mut Value, key: &str) -> Result<()>;

    /// Removes every child.
    fn clear(&self, node: &mut Value) -> Result<()>;

    /// Current keys, in iteration order. Sequences yield their positions.
    fn keys(&self, node: &Value) -> Vec<String>;

    /// Runs `op` on the child at `key` (starting from null when absent) and stores the result.
    fn update(&self, node: &mut Value, key: &str, op: &mut SlotOp<'_>) -> Result<()> {
        let mut child = self
            .read(node, key)
            .map(Cow::into_owned)
            .unwrap_or_default();
        op(&mut child)?;
        self.write(node, key, child)
    }
}

/// Returns the adapter for `node`, or `None` for scalars.
pub fn adapter_for(node: &Value) -> Option<&'static dyn TargetAdapter> {
    match node {
        Value::Mapping(_) => Some(&MappingAdapter),
        Value::Sequence(_) => Some(&SequenceAdapter),
        Value::Object(_) => Some(&ObjectAdapter),
        Value::Collection(_) => Some(&CollectionAdapter),
        Value::Snapshot(_) => Some(&SnapshotAdapter),
        Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => None,
    }
}
