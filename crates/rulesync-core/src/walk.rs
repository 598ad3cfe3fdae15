//! Scope-aware traversal of an instance tree.
//!
//! Objects may carry a scope marker (`killteamId`); the innermost marker on
//! the way down is the scope of everything beneath it. The walker threads that
//! scope and the current path through the recursion and hands every object
//! node to a caller-supplied closure. It never mutates the tree; passes that
//! need to edit record paths and apply them afterwards.

use std::borrow::Cow;

use rulesync_shape::TreePath;
use serde_json::{Map, Value};

/// Scope introduced by a marker value. Non-empty strings and numbers set a
/// scope; anything else clears it for the subtree.
pub fn scope_of(marker: &Value) -> Option<Cow<'_, str>> {
    match marker {
        Value::String(s) if !s.is_empty() => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'k> {
    scope_key: &'k str,
}

impl<'k> TreeWalker<'k> {
    pub fn new(scope_key: &'k str) -> Self {
        Self { scope_key }
    }

    pub fn walk<'a, F>(&self, root: &'a Value, visit: F)
    where
        F: FnMut(&'a Map<String, Value>, Option<&str>, &TreePath),
    {
        self.walk_in_scope(root, None, visit)
    }

    /// Walk with an inherited scope already in effect at the root.
    pub fn walk_in_scope<'a, F>(&self, root: &'a Value, scope: Option<&'a str>, mut visit: F)
    where
        F: FnMut(&'a Map<String, Value>, Option<&str>, &TreePath),
    {
        let mut path = TreePath::root();
        self.descend(root, scope.map(Cow::Borrowed), &mut path, &mut visit);
    }

    fn descend<'a, F>(
        &self,
        value: &'a Value,
        inherited: Option<Cow<'a, str>>,
        path: &mut TreePath,
        visit: &mut F,
    ) where
        F: FnMut(&'a Map<String, Value>, Option<&str>, &TreePath),
    {
        match value {
            Value::Object(map) => {
                let scope = match map.get(self.scope_key) {
                    Some(marker) => scope_of(marker),
                    None => inherited,
                };
                visit(map, scope.as_deref(), path);
                for (key, child) in map {
                    path.push_key(key);
                    self.descend(child, scope.clone(), path, visit);
                    path.pop();
                }
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    path.push_index(i);
                    self.descend(item, inherited.clone(), path, visit);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}
