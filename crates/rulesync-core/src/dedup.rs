//! Identifier deduplication (keep-first).
//!
//! The first entry with a given identifier wins. Later entries are dropped
//! whole, even when their fields differ from the kept one; nothing is merged.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::catalog::{Catalog, CatalogEntry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateOccurrence {
    pub index: usize,
    pub name: String,
    pub team: Option<String>,
}

/// All occurrences of one colliding identifier, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub id: String,
    pub count: usize,
    pub occurrences: Vec<DuplicateOccurrence>,
}

/// A dropped entry. Indices refer to the catalog before deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateIdentifier {
    pub id: String,
    pub removed_index: usize,
    pub kept_index: usize,
    pub name: String,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DedupReport {
    pub groups: Vec<DuplicateGroup>,
    pub removed: Vec<DuplicateIdentifier>,
    pub remaining: usize,
}

impl DedupReport {
    pub fn is_clean(&self) -> bool {
        self.removed.is_empty()
    }
}

/// Colliding identifiers, sorted by identifier.
pub fn find_duplicates(entries: &[CatalogEntry]) -> Vec<DuplicateGroup> {
    let mut by_id: BTreeMap<&str, Vec<DuplicateOccurrence>> = BTreeMap::new();
    for (index, e) in entries.iter().enumerate() {
        by_id.entry(e.id.as_str()).or_default().push(DuplicateOccurrence {
            index,
            name: e.name.clone(),
            team: e.team.clone(),
        });
    }
    by_id
        .into_iter()
        .filter(|(_, occ)| occ.len() > 1)
        .map(|(id, occurrences)| DuplicateGroup {
            id: id.to_string(),
            count: occurrences.len(),
            occurrences,
        })
        .collect()
}

pub fn dedup_entries(catalog: &mut Catalog) -> DedupReport {
    let groups = find_duplicates(&catalog.entries);

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut removed = Vec::new();
    let mut kept = Vec::with_capacity(catalog.entries.len());

    for (index, entry) in std::mem::take(&mut catalog.entries).into_iter().enumerate() {
        match first_seen.get(&entry.id) {
            Some(&kept_index) => {
                tracing::warn!(id = %entry.id, name = %entry.name, index, kept_index, "removing duplicate catalog entry");
                removed.push(DuplicateIdentifier {
                    id: entry.id,
                    removed_index: index,
                    kept_index,
                    name: entry.name,
                    team: entry.team,
                });
            }
            None => {
                first_seen.insert(entry.id.clone(), index);
                kept.push(entry);
            }
        }
    }

    catalog.entries = kept;
    tracing::info!(
        removed = removed.len(),
        remaining = catalog.entries.len(),
        "deduplicated catalog"
    );
    DedupReport {
        groups,
        removed,
        remaining: catalog.entries.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: Vec<CatalogEntry>) -> Catalog {
        Catalog::from_entries("weapon_rules", entries)
    }

    #[test]
    fn keeps_first_and_reports_later_duplicates() {
        let mut c = catalog(vec![
            CatalogEntry::new("WR-A", "First"),
            CatalogEntry::new("WR-B", "B"),
            CatalogEntry::new("WR-A", "Second").with_team("T"),
            CatalogEntry::new("WR-A", "Third"),
        ]);
        let report = dedup_entries(&mut c);

        let ids: Vec<_> = c.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["WR-A", "WR-B"]);
        assert_eq!(c.entries[0].name, "First");
        assert_eq!(report.remaining, 2);
        assert_eq!(
            report.removed,
            vec![
                DuplicateIdentifier {
                    id: "WR-A".into(),
                    removed_index: 2,
                    kept_index: 0,
                    name: "Second".into(),
                    team: Some("T".into()),
                },
                DuplicateIdentifier {
                    id: "WR-A".into(),
                    removed_index: 3,
                    kept_index: 0,
                    name: "Third".into(),
                    team: None,
                },
            ]
        );
        assert_eq!(report.groups.len(), 1);
        assert_eq!(report.groups[0].count, 3);
    }

    #[test]
    fn later_field_values_are_discarded_not_merged() {
        let mut c = catalog(vec![
            CatalogEntry::new("WR-A", "Kept"),
            CatalogEntry::new("WR-A", "Dropped").with_description("only the duplicate had this"),
        ]);
        dedup_entries(&mut c);
        assert_eq!(c.entries.len(), 1);
        assert_eq!(c.entries[0].description, "");
    }

    #[test]
    fn clean_catalog_is_untouched() {
        let original = vec![CatalogEntry::new("WR-A", "A"), CatalogEntry::new("WR-B", "B")];
        let mut c = catalog(original.clone());
        let report = dedup_entries(&mut c);
        assert!(report.is_clean());
        assert!(report.groups.is_empty());
        assert_eq!(c.entries, original);
    }

    #[test]
    fn groups_are_sorted_by_identifier() {
        let entries = vec![
            CatalogEntry::new("WR-Z", "z"),
            CatalogEntry::new("WR-A", "a"),
            CatalogEntry::new("WR-Z", "z2"),
            CatalogEntry::new("WR-A", "a2"),
        ];
        let groups = find_duplicates(&entries);
        let ids: Vec<_> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["WR-A", "WR-Z"]);
        assert_eq!(
            groups[1].occurrences.iter().map(|o| o.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }
}
