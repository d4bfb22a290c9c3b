//! Adapter for framework collection handles.

use super::TargetAdapter;
use crate::dotpath::error::Result;
use crate::target::Value;
use std::borrow::Cow;

pub struct CollectionAdapter;

impl TargetAdapter for CollectionAdapter {
    fn name(&self) -> &'static str {
        "collection"
    }

    fn has(&self, node: &Value, key: &str) -> bool {
        match node {
            Value::Collection(collection) => collection.borrow().contains_key(key),
            _ => false,
        }
    }

    fn read<'a>(&self, node: &'a Value, key: &str) -> Option<Cow<'a, Value>> {
        match node {
            Value::Collection(collection) => collection.borrow().get(key).map(Cow::Owned),
            _ => None,
        }
    }

    fn write(&self, node: &mut Value, key: &str, value: Value) -> Result<()> {
        if let Value::Collection(collection) = node {
            collection.borrow_mut().set(key, value);
        }
        Ok(())
    }

    fn remove(&self, node: &mut Value, key: &str) -> Result<()> {
        if let Value::Collection(collection) = node {
            collection.borrow_mut().remove(key);
        }
        Ok(())
    }

    fn clear(&self, node: &mut Value) -> Result<()> {
        if let Value::Collection(collection) = node {
            collection.borrow_mut().clear();
        }
        Ok(())
    }

    fn keys(&self, node: &Value) -> Vec<String> {
        match node {
            Value::Collection(collection) => collection.borrow().keys(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::{ArrayCollection, Collection, CollectionRef};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_write_goes_to_backing_store() {
        let store = Rc::new(RefCell::new(ArrayCollection::from_values(vec![Value::from(1)])));
        let mut node = Value::Collection(CollectionRef::from_rc(store.clone()));
        CollectionAdapter.write(&mut node, "1", Value::from(2)).unwrap();
        CollectionAdapter.remove(&mut node, "0").unwrap();
        assert_eq!(store.borrow().keys(), vec!["1".to_string()]);
    }

    #[test]
    fn test_read_missing_key() {
        let node = Value::collection(ArrayCollection::new());
        assert!(CollectionAdapter.read(&node, "0").is_none());
        assert!(!CollectionAdapter.has(&node, "0"));
    }

    #[test]
    fn test_clear_empties_collection() {
        let mut node = Value::collection(ArrayCollection::from_values(vec![
            Value::from(1),
            Value::from(2),
        ]));
        CollectionAdapter.clear(&mut node).unwrap();
        assert!(CollectionAdapter.keys(&node).is_empty());
    }
}
