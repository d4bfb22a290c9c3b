//! Read-only traversal.

use super::ast::{has_wildcard, DotPath, Segment};
use super::error::{PathError, Result};
use super::expander::WildcardExpander;
use super::parser::Parser;
use crate::adapter::adapter_for;
use crate::target::{NodeKind, Value};

/// Resolves dot-paths against a borrowed root.
pub struct Accessor<'a> {
    root: &'a Value,
}

impl<'a> Accessor<'a> {
    pub fn new(root: &'a Value) -> Self {
        Accessor { root }
    }

    /// Returns the value at `path`, or `default` when it does not resolve.
    ///
    /// A wildcard path yields a sequence of every resolvable match, flattened
    /// across nested wildcards; matches that don't resolve are dropped.
    pub fn get(&self, path: &str, default: Value) -> Result<Value> {
        let path = Parser::parse(path)?;
        self.get_parsed(&path, default)
    }

    pub fn get_parsed(&self, path: &DotPath, default: Value) -> Result<Value> {
        check_root(self.root, path)?;
        Ok(resolve(self.root, &path.segments).unwrap_or(default))
    }

    /// Returns true if `path` resolves. A wildcard path needs at least one match.
    pub fn has(&self, path: &str) -> Result<bool> {
        let path = Parser::parse(path)?;
        check_root(self.root, &path)?;
        Ok(!WildcardExpander::expand(self.root, &path.segments).is_empty())
    }

    /// Concrete dot-paths that `path` currently matches.
    pub fn expand(&self, path: &str) -> Result<Vec<String>> {
        let path = Parser::parse(path)?;
        check_root(self.root, &path)?;
        Ok(WildcardExpander::expand(self.root, &path.segments)
            .into_iter()
            .map(|keys| keys.join("."))
            .collect())
    }
}

/// Scalars can't be the root of a non-empty path.
pub(crate) fn check_root(root: &Value, path: &DotPath) -> Result<()> {
    if !path.is_identity() && root.kind() == NodeKind::Scalar {
        return Err(PathError::UnsupportedTargetType {
            kind: scalar_name(root).to_string(),
        });
    }
    Ok(())
}

fn scalar_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Int(_) => "int",
        Value::Float(_) => "float",
        Value::String(_) => "string",
        _ => "scalar",
    }
}

fn resolve(node: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((segment, rest)) = segments.split_first() else {
        return Some(node.clone());
    };
    let adapter = adapter_for(node)?;

    match segment {
        Segment::Literal(key) => {
            let child = adapter.read(node, key)?;
            resolve(&child, rest)
        }
        Segment::Wildcard => {
            // Nested wildcards come back as sequences; splice them in so the
            // result is flat.
            let flatten = has_wildcard(rest);
            let mut results = Vec::new();
            for key in WildcardExpander::keys(node) {
                let Some(child) = adapter.read(node, &key) else {
                    continue;
                };
                match resolve(&child, rest) {
                    Some(Value::Sequence(items)) if flatten => results.extend(items),
                    Some(value) => results.push(value),
                    None => {}
                }
            }
            Some(Value::Sequence(results))
        }
    }
}
