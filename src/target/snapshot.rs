//! Read-only wrappers that only know how to produce plain data.
//!
//! Writing through a snapshot never reaches the wrapped type: the engine
//! materializes the snapshot into a plain mapping or sequence and mutates
//! that copy, which replaces the wrapper in the target.

use super::Value;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// "Convert to plain data" capability.
pub trait ToPlain {
    /// Returns a plain copy of the wrapped data.
    fn to_plain(&self) -> Value;
}

/// Shared handle to a snapshot-only wrapper.
#[derive(Clone)]
pub struct SnapshotRef(Rc<dyn ToPlain>);

impl SnapshotRef {
    pub fn new<S: ToPlain + 'static>(wrapper: S) -> Self {
        SnapshotRef(Rc::new(wrapper))
    }

    pub fn to_plain(&self) -> Value {
        self.0.to_plain()
    }
}

impl fmt::Debug for SnapshotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Snapshot").field(&self.to_plain()).finish()
    }
}

/// Wraps any serializable type, snapshotting it through `serde_json`.
///
/// ```
/// use pathquill::target::{Json, NodeKind, Value};
///
/// #[derive(serde::Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = Value::snapshot(Json(Point { x: 1, y: 2 }));
/// assert_eq!(value.kind(), NodeKind::Mapping);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T: Serialize> ToPlain for Json<T> {
    fn to_plain(&self) -> Value {
        match serde_json::to_value(&self.0) {
            Ok(json) => Value::from(json),
            Err(err) => {
                tracing::warn!(error = %err, "failed to snapshot serializable value");
                Value::Null
            }
        }
    }
}

impl ToPlain for Value {
    fn to_plain(&self) -> Value {
        Value::to_plain(self)
    }
}
