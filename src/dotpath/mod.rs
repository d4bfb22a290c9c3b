//! Dot-path parsing and traversal.
//!
//! Paths are `.`-separated segments; a segment equal to `*` matches every key
//! at its depth, and a path may contain any number of them.
//!
//! # Syntax
//!
//! - `user.name` - named key or field
//! - `users.0.name` - sequence position (plain decimal)
//! - `users.*.name` - every element of `users`
//! - `a.*.b.*.c` - deep wildcard, results flattened in traversal order
//! - `` (empty) - the target itself
//!
//! Leading, trailing and doubled separators are rejected, as is `*` mixed
//! into a longer segment.

pub mod accessor;
pub mod ast;
pub mod error;
pub mod expander;
pub mod mutator;
pub mod parser;

pub use accessor::Accessor;
pub use ast::{DotPath, Segment};
pub use error::{PathError, Result};
pub use expander::WildcardExpander;
pub use mutator::{merge_into, Mutator, WriteMode};
pub use parser::Parser;
