//! Runtime values that dot-paths traverse.
//!
//! A [`Value`] is whatever currently occupies a traversal position: plain
//! mappings and sequences (value semantics), record and collection handles
//! (reference semantics, shared through `Rc<RefCell<..>>`), read-only
//! snapshot wrappers, or scalars.
//!
//! # Example
//!
//! ```
//! use pathquill::target::{NodeKind, Value};
//!
//! let user = Value::mapping([("name", Value::from("Alice")), ("age", Value::from(30))]);
//! assert_eq!(user.kind(), NodeKind::Mapping);
//! assert_eq!(Value::from("x").kind(), NodeKind::Scalar);
//! ```

pub mod collection;
pub mod convert;
pub mod record;
pub mod snapshot;

use indexmap::IndexMap;
use std::fmt;

pub use collection::{ArrayCollection, Collection, CollectionRef};
pub use record::{DynamicRecord, ObjectRef, Record};
pub use snapshot::{Json, SnapshotRef, ToPlain};

/// An ordered, string-keyed mapping.
pub type Mapping = IndexMap<String, Value>;

/// Classification of a value at one traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Mapping,
    Sequence,
    Object,
    Scalar,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Mapping => "mapping",
            NodeKind::Sequence => "sequence",
            NodeKind::Object => "object",
            NodeKind::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// A value inside (or at the root of) a nested data structure.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Ordered key-value mapping, insertion order preserved.
    Mapping(Mapping),
    /// Integer-indexed ordered list.
    Sequence(Vec<Value>),
    /// Shared handle to a record exposing named fields.
    Object(ObjectRef),
    /// Shared handle to a mutable framework collection.
    Collection(CollectionRef),
    /// Read-only wrapper that can only produce a plain copy of its data.
    Snapshot(SnapshotRef),
}

impl Value {
    /// Builds a mapping from key-value pairs, keeping their order.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a sequence from values.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Value::Sequence(items.into_iter().collect())
    }

    /// Wraps a record in a shared object handle.
    pub fn object<R: Record + 'static>(record: R) -> Self {
        Value::Object(ObjectRef::new(record))
    }

    /// Wraps a collection in a shared collection handle.
    pub fn collection<C: Collection + 'static>(collection: C) -> Self {
        Value::Collection(CollectionRef::new(collection))
    }

    /// Wraps a snapshot-only type.
    pub fn snapshot<S: ToPlain + 'static>(wrapper: S) -> Self {
        Value::Snapshot(SnapshotRef::new(wrapper))
    }

    /// Classifies this value for traversal.
    pub fn kind(&self) -> NodeKind {
        match self {
            Value::Mapping(_) => NodeKind::Mapping,
            Value::Sequence(_) => NodeKind::Sequence,
            Value::Object(_) | Value::Collection(_) => NodeKind::Object,
            Value::Snapshot(snapshot) => snapshot.to_plain().kind(),
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::String(_) => {
                NodeKind::Scalar
            }
        }
    }

    /// Returns true if a path can descend into this value.
    pub fn is_container(&self) -> bool {
        self.kind() != NodeKind::Scalar
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Number of direct children; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Mapping(map) => map.len(),
            Value::Sequence(items) => items.len(),
            Value::Object(object) => record::all_field_names(&*object.borrow()).len(),
            Value::Collection(collection) => collection.borrow().keys().len(),
            Value::Snapshot(snapshot) => snapshot.to_plain().len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces a snapshot wrapper with its plain data. Other values are left alone.
    pub fn materialize(&mut self) {
        if let Value::Snapshot(snapshot) = self {
            *self = snapshot.to_plain();
        }
    }

    /// Returns a fully plain copy: records become mappings of their fields,
    /// collections become mappings (or sequences, when keyed `0..n`), snapshots
    /// become their data.
    pub fn to_plain(&self) -> Value {
        match self {
            Value::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_plain()))
                    .collect(),
            ),
            Value::Sequence(items) => Value::Sequence(items.iter().map(Value::to_plain).collect()),
            Value::Object(object) => {
                let object = object.borrow();
                let mut fields = Mapping::new();
                for name in record::all_field_names(&*object) {
                    if let Some(value) = record::read_field(&*object, &name) {
                        fields.insert(name, value.to_plain());
                    }
                }
                Value::Mapping(fields)
            }
            Value::Collection(collection) => {
                let collection = collection.borrow();
                let keys = collection.keys();
                let list_like = keys
                    .iter()
                    .enumerate()
                    .all(|(i, key)| *key == i.to_string());
                let entries = keys
                    .into_iter()
                    .filter_map(|key| collection.get(&key).map(|value| (key, value.to_plain())));
                if list_like {
                    Value::Sequence(entries.map(|(_, v)| v).collect())
                } else {
                    Value::Mapping(entries.collect())
                }
            }
            Value::Snapshot(snapshot) => snapshot.to_plain().to_plain(),
            scalar => scalar.clone(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Mapping(a), Value::Mapping(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b) || self.to_plain() == other.to_plain(),
            (Value::Collection(a), Value::Collection(b)) => {
                a.ptr_eq(b) || self.to_plain() == other.to_plain()
            }
            (Value::Snapshot(a), Value::Snapshot(b)) => a.to_plain() == b.to_plain(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}
