//! Backfill catalog entries for identifiers the instance tree references but
//! the catalog does not define.

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::{EngineConfig, IdScheme};
use crate::references::{collect_references, UnknownReference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    /// A reference occurrence carried a display name.
    Recorded,
    /// Derived from the identifier.
    Derived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynthesizedEntry {
    pub id: String,
    pub name: String,
    pub variable: bool,
    pub name_source: NameSource,
    pub occurrences: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BackfillReport {
    pub added: Vec<SynthesizedEntry>,
}

/// Default entry for an unknown identifier. Ownership is left pending
/// (`universal: false`, `team: null`) until ownership resolution runs.
pub fn synthesize_entry(id: &str, info: &UnknownReference, ids: &IdScheme) -> CatalogEntry {
    let name = match &info.name {
        Some(name) => name.clone(),
        None => ids.display_name(id),
    };
    CatalogEntry {
        variable: info.has_parameter,
        universal: Some(false),
        ..CatalogEntry::new(id, &name)
    }
}

/// Append an entry for every unknown referenced identifier, in ascending
/// identifier order. Running it again over its own output adds nothing.
pub fn backfill_missing(
    catalog: &mut Catalog,
    instance: &Value,
    config: &EngineConfig,
) -> BackfillReport {
    let unknown = {
        let known = catalog.ids();
        collect_references(instance, &known, &config.keys).unknown
    };

    let mut report = BackfillReport::default();
    for (id, info) in &unknown {
        let entry = synthesize_entry(id, info, &config.ids);
        tracing::debug!(id = %entry.id, name = %entry.name, variable = entry.variable, "synthesized catalog entry");
        report.added.push(SynthesizedEntry {
            id: entry.id.clone(),
            name: entry.name.clone(),
            variable: entry.variable,
            name_source: if info.name.is_some() {
                NameSource::Recorded
            } else {
                NameSource::Derived
            },
            occurrences: info.occurrences,
        });
        catalog.entries.push(entry);
    }

    tracing::info!(added = report.added.len(), "backfilled missing catalog entries");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn synthesizes_sorted_entries_with_derived_or_recorded_names() {
        let mut catalog = Catalog::from_entries(
            "weapon_rules",
            vec![CatalogEntry::new("WR-UNIV-LETHAL", "Lethal")],
        );
        let instance = json!({
            "killteamId": "KOM",
            "WR": [
                {"id": "WR-KOM-*SAW", "number": 2},
                {"id": "WR-UNIV-LETHAL", "number": 5},
                {"id": "WR-KOM-BLAST-ZONE", "name": "Blast Zone (KOM)"}
            ]
        });
        let report = backfill_missing(&mut catalog, &instance, &config());

        let ids: Vec<_> = catalog.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["WR-UNIV-LETHAL", "WR-KOM-*SAW", "WR-KOM-BLAST-ZONE"]);

        let saw = catalog.get("WR-KOM-*SAW").unwrap();
        assert_eq!(saw.name, "Saw");
        assert!(saw.variable);
        assert_eq!(saw.description, "");
        assert_eq!(saw.team, None);
        assert_eq!(saw.universal, Some(false));

        let blast = catalog.get("WR-KOM-BLAST-ZONE").unwrap();
        assert_eq!(blast.name, "Blast Zone (KOM)");
        assert!(!blast.variable);

        assert_eq!(report.added[0].name_source, NameSource::Derived);
        assert_eq!(report.added[1].name_source, NameSource::Recorded);
    }

    #[test]
    fn second_run_adds_nothing() {
        let mut catalog = Catalog::from_entries("weapon_rules", Vec::new());
        let instance = json!({"a": {"WR": [{"id": "WR-X-ONE"}, {"id": "WR-X-TWO"}]}});
        assert_eq!(backfill_missing(&mut catalog, &instance, &config()).added.len(), 2);
        assert!(backfill_missing(&mut catalog, &instance, &config()).added.is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn synthesized_name_for_foreign_namespace() {
        let ids = IdScheme {
            namespace: "R".to_string(),
            ..IdScheme::default()
        };
        let entry = synthesize_entry("R-A-cool-trick", &UnknownReference::default(), &ids);
        assert_eq!(entry.name, "Cool Trick");
    }
}
