//! Records: values exposing named fields.
//!
//! A [`Record`] is implemented deliberately by each domain type that should be
//! traversable by name. Declared fields go through `get_field`/`set_field`;
//! types that want permissive "create the field on first write" behaviour opt
//! in by exposing a dynamic field store.

use super::{Mapping, Value};
use crate::dotpath::error::PathError;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Field-level access to a structured value.
pub trait Record: fmt::Debug {
    /// Name used in error messages and logs.
    fn type_name(&self) -> &str;

    /// Declared field names, in declaration order.
    fn field_names(&self) -> Vec<String>;

    /// Reads a declared field.
    fn get_field(&self, name: &str) -> Option<Value>;

    /// Writes a declared field. Hands the value back when no such field exists.
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), Value>;

    fn has_field(&self, name: &str) -> bool {
        self.get_field(name).is_some()
    }

    /// Clears a declared field. Returns false if the field does not exist.
    fn remove_field(&mut self, name: &str) -> bool {
        self.set_field(name, Value::Null).is_ok()
    }

    /// Dynamic field store, for records that accept fields they never declared.
    fn dynamic_fields(&self) -> Option<&Mapping> {
        None
    }

    fn dynamic_fields_mut(&mut self) -> Option<&mut Mapping> {
        None
    }
}

/// Declared fields followed by dynamic ones.
pub(crate) fn all_field_names(record: &dyn Record) -> Vec<String> {
    let mut names = record.field_names();
    if let Some(dynamic) = record.dynamic_fields() {
        for key in dynamic.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }
    names
}

pub(crate) fn has_field(record: &dyn Record, name: &str) -> bool {
    record.has_field(name)
        || record
            .dynamic_fields()
            .is_some_and(|dynamic| dynamic.contains_key(name))
}

pub(crate) fn read_field(record: &dyn Record, name: &str) -> Option<Value> {
    record
        .get_field(name)
        .or_else(|| record.dynamic_fields().and_then(|d| d.get(name).cloned()))
}

/// Declared accessor first, then the dynamic store, else `UnknownField`.
pub(crate) fn write_field(record: &mut dyn Record, name: &str, value: Value) -> Result<(), PathError> {
    let value = match record.set_field(name, value) {
        Ok(()) => return Ok(()),
        Err(value) => value,
    };
    let type_name = record.type_name().to_string();
    match record.dynamic_fields_mut() {
        Some(dynamic) => {
            tracing::trace!(type_name = %type_name, field = name, "writing dynamic field");
            dynamic.insert(name.to_string(), value);
            Ok(())
        }
        None => Err(PathError::UnknownField {
            type_name,
            field: name.to_string(),
        }),
    }
}

pub(crate) fn remove_field(record: &mut dyn Record, name: &str) {
    if let Some(dynamic) = record.dynamic_fields_mut() {
        if dynamic.shift_remove(name).is_some() {
            return;
        }
    }
    if record.has_field(name) {
        record.remove_field(name);
    }
}

/// Shared, mutable handle to a record. Clones point at the same instance.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<dyn Record>>);

impl ObjectRef {
    pub fn new<R: Record + 'static>(record: R) -> Self {
        ObjectRef(Rc::new(RefCell::new(record)))
    }

    /// Wraps an existing shared record, so the caller keeps a typed handle to it.
    pub fn from_rc<R: Record + 'static>(record: Rc<RefCell<R>>) -> Self {
        ObjectRef(record)
    }

    pub fn borrow(&self) -> Ref<'_, dyn Record> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Record> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles refer to the same instance.
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(record) => fmt::Debug::fmt(&*record, f),
            Err(_) => f.write_str("ObjectRef(<borrowed>)"),
        }
    }
}

/// A generic record whose fields are all dynamic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DynamicRecord {
    type_name: String,
    fields: Mapping,
}

impl DynamicRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Mapping::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Mapping {
        &self.fields
    }
}

impl Record for DynamicRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn field_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn get_field(&self, _name: &str) -> Option<Value> {
        None
    }

    fn set_field(&mut self, _name: &str, value: Value) -> Result<(), Value> {
        Err(value)
    }

    fn remove_field(&mut self, _name: &str) -> bool {
        false
    }

    fn dynamic_fields(&self) -> Option<&Mapping> {
        Some(&self.fields)
    }

    fn dynamic_fields_mut(&mut self) -> Option<&mut Mapping> {
        Some(&mut self.fields)
    }
}
