//! Wildcard expansion against the current state of a target.

use super::ast::Segment;
use crate::adapter::adapter_for;
use crate::target::Value;

/// Enumerates the keys a wildcard matches, and the concrete paths a
/// wildcard path resolves to.
pub struct WildcardExpander;

impl WildcardExpander {
    /// Keys a wildcard matches at `node`, in iteration order. Scalars match nothing.
    pub fn keys(node: &Value) -> Vec<String> {
        let keys = adapter_for(node).map(|a| a.keys(node)).unwrap_or_default();
        tracing::trace!(kind = %node.kind(), matches = keys.len(), "expanded wildcard");
        keys
    }

    /// Resolves `segments` to every concrete key path that exists in `node`.
    ///
    /// Multiple wildcards compose level by level; results are in traversal order.
    ///
    /// ```
    /// use pathquill::dotpath::{Parser, WildcardExpander};
    /// use pathquill::target::Value;
    ///
    /// let data: Value = serde_json::from_str(r#"{"a": [{"b": 1}, {"c": 2}, {"b": 3}]}"#).unwrap();
    /// let path = Parser::parse("a.*.b").unwrap();
    /// let found = WildcardExpander::expand(&data, &path.segments);
    /// assert_eq!(found, vec![vec!["a", "0", "b"], vec!["a", "2", "b"]]);
    /// ```
    pub fn expand(node: &Value, segments: &[Segment]) -> Vec<Vec<String>> {
        let mut results = Vec::new();
        let mut prefix = Vec::new();
        Self::walk(node, segments, &mut prefix, &mut results);
        results
    }

    fn walk(
        node: &Value,
        segments: &[Segment],
        prefix: &mut Vec<String>,
        results: &mut Vec<Vec<String>>,
    ) {
        let Some((segment, rest)) = segments.split_first() else {
            results.push(prefix.clone());
            return;
        };
        let Some(adapter) = adapter_for(node) else {
            return;
        };

        let keys = match segment {
            Segment::Literal(key) => vec![key.clone()],
            Segment::Wildcard => Self::keys(node),
        };

        for key in keys {
            if let Some(child) = adapter.read(node, &key) {
                prefix.push(key);
                Self::walk(&child, rest, prefix, results);
                prefix.pop();
            }
        }
    }
}
