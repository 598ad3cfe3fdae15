use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use rulesync_core::{
    backfill_missing, dedup_entries, resolve_team, Catalog, CatalogEntry, EngineConfig,
    OwnershipPolicy,
};
use serde_json::{json, Value};

const KEY: &str = "weapon_rules";

fn rule_id() -> impl Strategy<Value = String> {
    ("[A-C]", "[A-E]{1,3}").prop_map(|(team, name)| format!("WR-{team}-{name}"))
}

fn entry() -> impl Strategy<Value = CatalogEntry> {
    (rule_id(), "[a-z]{0,5}", proptest::option::of("[A-C]")).prop_map(|(id, name, team)| {
        let mut e = CatalogEntry::new(&id, &name);
        e.team = team;
        e
    })
}

/// Instance tree: scoped groups, each holding a reference list.
fn instance() -> impl Strategy<Value = Value> {
    proptest::collection::vec(
        (
            proptest::option::of("Team[A-C]"),
            proptest::collection::vec((rule_id(), proptest::option::of(0u8..4)), 0..6),
        ),
        0..5,
    )
    .prop_map(|groups| {
        let groups: Vec<Value> = groups
            .into_iter()
            .map(|(scope, refs)| {
                let refs: Vec<Value> = refs
                    .into_iter()
                    .map(|(id, n)| match n {
                        Some(n) => json!({"id": id, "number": n}),
                        None => json!({"id": id}),
                    })
                    .collect();
                match scope {
                    Some(s) => json!({"killteamId": s, "weapons": [{"WR": refs}]}),
                    None => json!({"weapons": [{"WR": refs}]}),
                }
            })
            .collect();
        json!({ "teams": groups })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn dedup_leaves_exactly_the_first_occurrence_of_each_id(entries in proptest::collection::vec(entry(), 0..20)) {
        let mut first: HashMap<String, CatalogEntry> = HashMap::new();
        for e in &entries {
            first.entry(e.id.clone()).or_insert_with(|| e.clone());
        }

        let mut catalog = Catalog::from_entries(KEY, entries.clone());
        let report = dedup_entries(&mut catalog);

        prop_assert_eq!(catalog.len(), first.len());
        prop_assert_eq!(report.removed.len(), entries.len() - first.len());
        for e in &catalog.entries {
            prop_assert_eq!(catalog.entries.iter().filter(|x| x.id == e.id).count(), 1);
            prop_assert_eq!(Some(e), first.get(&e.id));
        }
    }

    #[test]
    fn backfill_is_idempotent(
        entries in proptest::collection::vec(entry(), 0..8),
        doc in instance(),
    ) {
        let config = EngineConfig::default();
        let mut catalog = Catalog::from_entries(KEY, entries);
        dedup_entries(&mut catalog);
        backfill_missing(&mut catalog, &doc, &config);
        let after_first = catalog.entries.clone();

        let second = backfill_missing(&mut catalog, &doc, &config);
        prop_assert!(second.added.is_empty());
        prop_assert_eq!(&catalog.entries, &after_first);
    }

    #[test]
    fn ownership_ignores_scope_observation_order(mut scopes in proptest::collection::vec("Team[A-F]", 1..6)) {
        let policy = OwnershipPolicy::default();
        let forward: BTreeSet<String> = scopes.iter().cloned().collect();
        scopes.reverse();
        let backward: BTreeSet<String> = scopes.iter().cloned().collect();
        let a = resolve_team(Some(&forward), None, &policy).0;
        let b = resolve_team(Some(&backward), None, &policy).0;
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.as_ref(), forward.iter().next());
    }
}

#[test]
fn backfilled_catalog_round_trips_through_json() {
    let config = EngineConfig::default();
    let doc = json!({"version": 2, "weapon_rules": [{"id": "WR-UNIV-LETHAL", "name": "Lethal",
        "variable": true, "description": "x", "team": null}]});
    let mut catalog = Catalog::from_value(doc, KEY).unwrap();
    let instance = json!({"killteamId": "A", "WR": [{"id": "WR-A-*BIG-GUN", "number": 1}]});
    backfill_missing(&mut catalog, &instance, &config);

    let out = catalog.to_value().unwrap();
    assert_eq!(out["version"], json!(2));
    assert_eq!(
        out["weapon_rules"][1],
        json!({"id": "WR-A-*BIG-GUN", "name": "Big Gun", "variable": true,
               "description": "", "universal": false, "team": null})
    );
}
