//! Ownership resolution: shared entry or owned by exactly one scope.
//!
//! Ownership is recomputed from the scopes that reference each entry, so the
//! result depends only on the instance tree and the policy. Entries already
//! known to be shared (`universal: true`, or the shared identifier prefix)
//! stay shared regardless of usage and keep `universal: true`; the flag is
//! dropped from every other entry.

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::{ContestedPolicy, EngineConfig, OwnershipPolicy, UnobservedPolicy};
use crate::references::collect_references;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipBasis {
    PreviouslyShared,
    SingleScope,
    Contested,
    Unobserved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipAssignment {
    pub id: String,
    pub team: Option<String>,
    pub basis: OwnershipBasis,
}

/// Informational: several scopes use one entry; `assigned` is the tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousOwnership {
    pub id: String,
    pub scopes: Vec<String>,
    pub assigned: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OwnershipReport {
    pub assignments: Vec<OwnershipAssignment>,
    pub ambiguous: Vec<AmbiguousOwnership>,
    pub total: usize,
    pub shared: usize,
    pub team_specific: usize,
}

/// Decide the team for one non-shared entry from the scopes that use it.
pub fn resolve_team(
    scopes: Option<&BTreeSet<String>>,
    current: Option<&str>,
    policy: &OwnershipPolicy,
) -> (Option<String>, OwnershipBasis) {
    let scopes: Vec<&String> = scopes.map(|s| s.iter().collect()).unwrap_or_default();
    match scopes.as_slice() {
        [] => {
            let team = match policy.unobserved {
                UnobservedPolicy::Shared => None,
                UnobservedPolicy::Keep => current.map(str::to_string),
            };
            (team, OwnershipBasis::Unobserved)
        }
        [only] => (Some((*only).clone()), OwnershipBasis::SingleScope),
        // BTreeSet iteration is ascending, so the first scope is the minimum.
        [first, ..] => {
            let team = match policy.contested {
                ContestedPolicy::LexicographicMin => Some((*first).clone()),
                ContestedPolicy::Shared => None,
            };
            (team, OwnershipBasis::Contested)
        }
    }
}

pub fn resolve_ownership(
    catalog: &mut Catalog,
    instance: &Value,
    config: &EngineConfig,
) -> OwnershipReport {
    let index = {
        let known = catalog.ids();
        collect_references(instance, &known, &config.keys)
    };

    let mut report = OwnershipReport::default();
    for entry in catalog.entries.iter_mut() {
        let previously_shared =
            entry.universal == Some(true) || config.ids.is_shared_id(&entry.id);

        let (team, basis) = if previously_shared {
            (None, OwnershipBasis::PreviouslyShared)
        } else {
            let scopes = index.scopes_for(&entry.id);
            let (team, basis) = resolve_team(scopes, entry.team.as_deref(), &config.ownership);
            if basis == OwnershipBasis::Contested {
                let scopes: Vec<String> = scopes.into_iter().flatten().cloned().collect();
                tracing::warn!(id = %entry.id, ?scopes, assigned = ?team, "entry referenced from several scopes");
                report.ambiguous.push(AmbiguousOwnership {
                    id: entry.id.clone(),
                    scopes,
                    assigned: team.clone(),
                });
            }
            (team, basis)
        };

        entry.team = team;
        // Kept on shared entries so the next run still sees them as shared.
        entry.universal = previously_shared.then_some(true);
        match entry.team {
            Some(_) => report.team_specific += 1,
            None => report.shared += 1,
        }
        report.assignments.push(OwnershipAssignment {
            id: entry.id.clone(),
            team: entry.team.clone(),
            basis,
        });
    }

    report.total = catalog.entries.len();
    tracing::info!(
        total = report.total,
        shared = report.shared,
        team_specific = report.team_specific,
        "resolved catalog ownership"
    );
    report
}
