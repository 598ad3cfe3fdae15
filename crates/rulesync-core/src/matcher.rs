//! Match inline annotations against catalog entries.
//!
//! Instance documents sometimes restate a catalog rule as a free-text
//! annotation (`abilities: [{abilityName: "Relentless", description: ...}]`).
//! Such an annotation matches an entry when their normalized names contain one
//! another and the entry is usable in the annotation's scope. A matched
//! annotation gives its description to an entry that has none yet and is then
//! removed from the instance tree.
//!
//! Winner selection is first-compatible-entry in catalog order. Entries are
//! bucketed by normalized match key once per run, so each distinct key is
//! compared against an annotation name only once.

use std::collections::{BTreeMap, HashMap};

use rulesync_shape::TreePath;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::{EngineConfig, IdScheme};
use crate::walk::TreeWalker;

struct KeyBucket {
    key: String,
    /// Catalog positions sharing this key, ascending.
    positions: Vec<usize>,
}

/// Normalized match key → candidate entries, built once per run.
pub struct MatchIndex {
    buckets: Vec<KeyBucket>,
}

impl MatchIndex {
    pub fn build(entries: &[CatalogEntry], ids: &IdScheme) -> Self {
        let mut buckets: Vec<KeyBucket> = Vec::new();
        let mut slot: HashMap<String, usize> = HashMap::new();
        for (pos, entry) in entries.iter().enumerate() {
            let key = ids.match_key(&entry.id);
            if key.is_empty() {
                continue;
            }
            match slot.get(&key) {
                Some(&b) => buckets[b].positions.push(pos),
                None => {
                    slot.insert(key.clone(), buckets.len());
                    buckets.push(KeyBucket {
                        key,
                        positions: vec![pos],
                    });
                }
            }
        }
        Self { buckets }
    }

    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }

    /// Catalog position of the first entry matching `normalized_name` that is
    /// usable in `scope`.
    pub fn find(
        &self,
        normalized_name: &str,
        scope: Option<&str>,
        entries: &[CatalogEntry],
    ) -> Option<usize> {
        if normalized_name.is_empty() {
            return None;
        }
        self.buckets
            .iter()
            .filter(|b| normalized_name.contains(&b.key) || b.key.contains(normalized_name))
            .filter_map(|b| {
                b.positions
                    .iter()
                    .copied()
                    .find(|&p| entries[p].usable_in(scope))
            })
            .min()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedAnnotation {
    pub path: TreePath,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation_id: Option<String>,
    pub annotation_name: String,
    pub entry_id: String,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    pub matched: Vec<MatchedAnnotation>,
    /// Entries whose empty description was filled, with the source annotation path.
    pub described: Vec<(String, TreePath)>,
    pub removed: usize,
    pub unmatched: usize,
}

/// Match annotations, backfill descriptions, and excise matched annotations.
pub fn match_annotations(
    catalog: &mut Catalog,
    instance: &mut Value,
    config: &EngineConfig,
) -> MatchReport {
    let keys = &config.keys;
    let ids = &config.ids;
    let index = MatchIndex::build(&catalog.entries, ids);
    tracing::debug!(keys = index.key_count(), "built match index");

    let mut report = MatchReport::default();
    // entry position → (description, annotation path); first match wins.
    let mut descriptions: BTreeMap<usize, (String, TreePath)> = BTreeMap::new();
    // annotation list pointer → indices to remove
    let mut removals: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    {
        let entries = &catalog.entries;
        TreeWalker::new(&keys.scope).walk(instance, |node, scope, path| {
            let Some(Value::Array(items)) = node.get(&keys.annotations) else {
                return;
            };
            let list_path = path.with_key(&keys.annotations);
            for (i, item) in items.iter().enumerate() {
                let Some(obj) = item.as_object() else {
                    continue;
                };
                let name = str_field(obj, &keys.annotation_name);
                let description = str_field(obj, &keys.annotation_description);
                if name.is_empty() || description.is_empty() {
                    continue;
                }

                let Some(pos) = index.find(&ids.normalize(name), scope, entries) else {
                    report.unmatched += 1;
                    continue;
                };
                let entry = &entries[pos];
                let ann_path = list_path.with_index(i);
                tracing::debug!(annotation = name, entry = %entry.id, path = %ann_path, "annotation matches catalog entry");

                descriptions
                    .entry(pos)
                    .or_insert_with(|| (description.to_string(), ann_path.clone()));
                removals.entry(list_path.to_pointer()).or_default().push(i);
                report.matched.push(MatchedAnnotation {
                    path: ann_path,
                    annotation_id: obj
                        .get(&keys.annotation_id)
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    annotation_name: name.to_string(),
                    entry_id: entry.id.clone(),
                    scope: scope.map(str::to_string),
                });
            }
        });
    }

    for (pos, (description, source)) in descriptions {
        let entry = &mut catalog.entries[pos];
        if entry.description.is_empty() {
            entry.description = description;
            report.described.push((entry.id.clone(), source));
        }
    }

    report.removed = remove_deferred(instance, removals);
    tracing::info!(
        matched = report.matched.len(),
        described = report.described.len(),
        removed = report.removed,
        "matched inline annotations"
    );
    report
}

fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a str {
    obj.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Remove recorded list elements, highest index first so earlier indices
/// stay valid. Lists are visited in reverse pointer order so a list nested
/// inside a removed annotation is handled before its parent shifts.
fn remove_deferred(instance: &mut Value, removals: BTreeMap<String, Vec<usize>>) -> usize {
    let mut removed = 0;
    for (pointer, mut indices) in removals.into_iter().rev() {
        let Some(Value::Array(items)) = instance.pointer_mut(&pointer) else {
            tracing::warn!(%pointer, "annotation list vanished before removal");
            continue;
        };
        indices.sort_unstable();
        indices.dedup();
        for i in indices.into_iter().rev() {
            if i < items.len() {
                items.remove(i);
                removed += 1;
            }
        }
    }
    removed
}
