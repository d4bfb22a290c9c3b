//! PathQuill: read and write nested data through dot-paths.
//!
//! Targets can be plain mappings and sequences, records exposing named fields,
//! framework collections mutated in place, or read-only snapshot wrappers.
//! Paths may contain `*` wildcards, any number of them.
//!
//! # Example
//!
//! ```
//! use pathquill::target::Value;
//!
//! let mut data: Value = serde_json::from_str("{}").unwrap();
//! pathquill::set_many(
//!     &mut data,
//!     [
//!         ("users.0.name", Value::from("Alice")),
//!         ("users.1.name", Value::from("Bob")),
//!         ("users.1.age", Value::from(25)),
//!     ],
//! )
//! .unwrap();
//!
//! let names = pathquill::get(&data, "users.*.name", Value::Null).unwrap();
//! assert_eq!(names, Value::sequence([Value::from("Alice"), Value::from("Bob")]));
//!
//! pathquill::unset(&mut data, "users.*.age").unwrap();
//! assert!(!pathquill::has(&data, "users.1.age").unwrap());
//! ```

pub mod adapter;
pub mod config;
pub mod dotpath;
pub mod file;
pub mod target;

pub use dotpath::{Accessor, Mutator, PathError, Result, WriteMode};
pub use target::Value;

/// Returns the value at `path`, or `default` when it does not resolve.
pub fn get(target: &Value, path: &str, default: Value) -> Result<Value> {
    Accessor::new(target).get(path, default)
}

/// Returns true if `path` resolves in `target`.
pub fn has(target: &Value, path: &str) -> Result<bool> {
    Accessor::new(target).has(path)
}

/// Concrete paths that a (possibly wildcard) `path` currently matches.
pub fn expand(target: &Value, path: &str) -> Result<Vec<String>> {
    Accessor::new(target).expand(path)
}

/// Overwrites the value at `path`, creating intermediate containers.
pub fn set(target: &mut Value, path: &str, value: Value) -> Result<()> {
    Mutator::new(target).set(path, value)
}

/// Writes `value` at `path`, combining containers instead of replacing them.
pub fn merge(target: &mut Value, path: &str, value: Value) -> Result<()> {
    Mutator::new(target).merge(path, value)
}

pub fn set_with(target: &mut Value, path: &str, value: Value, mode: WriteMode) -> Result<()> {
    Mutator::new(target).set_with(path, value, mode)
}

/// Applies several overwrites in order. Nothing is written if any path is malformed.
pub fn set_many<I, K>(target: &mut Value, entries: I) -> Result<()>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    Mutator::new(target).set_many(entries, WriteMode::Overwrite)
}

/// Removes the value at `path`; missing paths are ignored.
pub fn unset(target: &mut Value, path: &str) -> Result<()> {
    Mutator::new(target).unset(path)
}

pub fn unset_many<I, S>(target: &mut Value, paths: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Mutator::new(target).unset_many(paths)
}
