//! Catalog references embedded in the instance tree.
//!
//! A reference is an element of a reference list (`"WR": [{"id": .., "number": ..}]`)
//! anywhere in the tree. One walk produces every view the passes need:
//! the raw occurrences, the identifiers the catalog does not know yet, and
//! the distinct scopes each identifier is used from.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use rulesync_shape::TreePath;
use serde::Serialize;
use serde_json::Value;

use crate::config::DocumentKeys;
use crate::walk::TreeWalker;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub scope: Option<String>,
    pub path: TreePath,
}

/// What the instance tree says about an identifier missing from the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UnknownReference {
    pub has_parameter: bool,
    /// First non-empty display name seen on any occurrence.
    pub name: Option<String>,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    pub occurrences: Vec<Reference>,
    pub unknown: BTreeMap<String, UnknownReference>,
    pub scopes: BTreeMap<String, BTreeSet<String>>,
}

impl ReferenceIndex {
    pub fn scopes_for(&self, id: &str) -> Option<&BTreeSet<String>> {
        self.scopes.get(id)
    }
}

/// Collect every reference in `instance`. `known` is the catalog's identifier
/// set; anything outside it lands in [`ReferenceIndex::unknown`].
pub fn collect_references(
    instance: &Value,
    known: &HashSet<&str>,
    keys: &DocumentKeys,
) -> ReferenceIndex {
    let mut index = ReferenceIndex::default();

    TreeWalker::new(&keys.scope).walk(instance, |node, scope, path| {
        let Some(Value::Array(items)) = node.get(&keys.references) else {
            return;
        };
        for (i, item) in items.iter().enumerate() {
            let Some(obj) = item.as_object() else {
                continue;
            };
            let Some(id) = obj.get(&keys.reference_id).and_then(Value::as_str) else {
                continue;
            };
            let parameter = obj
                .get(&keys.reference_parameter)
                .filter(|v| !v.is_null())
                .cloned();
            let name = obj
                .get(&keys.reference_name)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string);

            if !known.contains(id) {
                let entry = index.unknown.entry(id.to_string()).or_default();
                entry.occurrences += 1;
                entry.has_parameter |= parameter.is_some();
                if entry.name.is_none() {
                    entry.name = name.clone();
                }
            }
            if let Some(scope) = scope {
                index
                    .scopes
                    .entry(id.to_string())
                    .or_default()
                    .insert(scope.to_string());
            }
            index.occurrences.push(Reference {
                id: id.to_string(),
                parameter,
                name,
                scope: scope.map(str::to_string),
                path: path.with_key(&keys.references).with_index(i),
            });
        }
    });

    tracing::debug!(
        occurrences = index.occurrences.len(),
        unknown = index.unknown.len(),
        "collected references"
    );
    index
}
