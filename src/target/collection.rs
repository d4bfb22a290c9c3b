//! Mutable framework collections.
//!
//! A [`Collection`] is a container owned by some surrounding framework (an
//! ORM result set, an entity relation) that is mutated in place rather than
//! copied. Paths address its entries by key; list-like collections use
//! decimal positions as keys.

use super::{Mapping, Value};
use crate::dotpath::ast::parse_index;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Keyed, in-place mutable storage.
pub trait Collection: fmt::Debug {
    /// Keys in iteration order.
    fn keys(&self) -> Vec<String>;

    fn get(&self, key: &str) -> Option<Value>;

    fn set(&mut self, key: &str, value: Value);

    fn remove(&mut self, key: &str) -> Option<Value>;

    fn clear(&mut self);

    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Shared, mutable handle to a collection. Clones point at the same instance.
#[derive(Clone)]
pub struct CollectionRef(Rc<RefCell<dyn Collection>>);

impl CollectionRef {
    pub fn new<C: Collection + 'static>(collection: C) -> Self {
        CollectionRef(Rc::new(RefCell::new(collection)))
    }

    /// Wraps an existing shared collection, so the caller keeps a typed handle to it.
    pub fn from_rc<C: Collection + 'static>(collection: Rc<RefCell<C>>) -> Self {
        CollectionRef(collection)
    }

    pub fn borrow(&self) -> Ref<'_, dyn Collection> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn Collection> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &CollectionRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(collection) => fmt::Debug::fmt(&*collection, f),
            Err(_) => f.write_str("CollectionRef(<borrowed>)"),
        }
    }
}

/// An ordered collection with array-like keys.
///
/// Keys keep their position after removals, like an associative array: removing
/// `"0"` from `["a", "b"]` leaves a single entry keyed `"1"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayCollection {
    entries: Mapping,
}

impl ArrayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list-like collection keyed `0..n`.
    pub fn from_values(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (i.to_string(), value))
            .collect();
        Self { entries }
    }

    /// Appends under the next free integer key.
    pub fn push(&mut self, value: Value) {
        let next = self
            .entries
            .keys()
            .filter_map(|key| parse_index(key))
            .max()
            .map_or(0, |max| max + 1);
        self.entries.insert(next.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }
}

impl Collection for ArrayCollection {
    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_keys_by_position() {
        let collection = ArrayCollection::from_values(vec![Value::from("a"), Value::from("b")]);
        assert_eq!(collection.keys(), vec!["0".to_string(), "1".to_string()]);
    }

    #[test]
    fn test_remove_keeps_remaining_keys() {
        let mut collection =
            ArrayCollection::from_values(vec![Value::from("a"), Value::from("b")]);
        collection.remove("0");
        assert_eq!(collection.keys(), vec!["1".to_string()]);
        assert_eq!(collection.get("1"), Some(Value::from("b")));
    }

    #[test]
    fn test_push_uses_next_integer_key() {
        let mut collection = ArrayCollection::new();
        collection.set("name", Value::from("x"));
        collection.push(Value::from(1));
        collection.push(Value::from(2));
        assert_eq!(
            collection.keys(),
            vec!["name".to_string(), "0".to_string(), "1".to_string()]
        );
    }

    #[test]
    fn test_handle_mutates_shared_instance() {
        let shared = Rc::new(RefCell::new(ArrayCollection::new()));
        let handle = CollectionRef::from_rc(shared.clone());
        handle.borrow_mut().set("k", Value::from(true));
        assert_eq!(shared.borrow().len(), 1);
    }
}
