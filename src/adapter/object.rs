//! Adapter for record handles.
//!
//! Reads go to the declared accessor first and the dynamic field store second.
//! Writes do the same, and fail with `UnknownField` only when the record has
//! neither. The handle is shared, so the caller's instance sees every change.

use super::TargetAdapter;
use crate::dotpath::error::Result;
use crate::target::record::{all_field_names, has_field, read_field, remove_field, write_field};
use crate::target::Value;
use std::borrow::Cow;

pub struct ObjectAdapter;

impl TargetAdapter for ObjectAdapter {
    fn name(&self) -> &'static str {
        "object"
    }

    fn has(&self, node: &Value, key: &str) -> bool {
        match node {
            Value::Object(object) => has_field(&*object.borrow(), key),
            _ => false,
        }
    }

    fn read<'a>(&self, node: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
        match node {
            Value::Object(object) => read_field(&*object.borrow(), key).map(Cow::Owned),
            _ => None,
        }
    }

    fn write(&self, node: &mut Value, key: &str, value: Value) -> Result<()> {
        match node {
            Value::Object(object) => write_field(&mut *object.borrow_mut(), key, value),
            _ => Ok(()),
        }
    }

    fn remove(&self, node: &mut Value, key: &str) -> Result<()> {
        if let Value::Object(object) = node {
            remove_field(&mut *object.borrow_mut(), key);
        }
        Ok(())
    }

    fn clear(&self, node: &mut Value) -> Result<()> {
        if let Value::Object(object) = node {
            let mut record = object.borrow_mut();
            for name in all_field_names(&*record) {
                remove_field(&mut *record, &name);
            }
        }
        Ok(())
    }

    fn keys(&self, node: &Value) -> Vec<String> {
        match node {
            Value::Object(object) => all_field_names(&*object.borrow()),
            _ => Vec::new(),
        }
    }
}
