//! Full reconciliation run.
//!
//! Order matters:
//! 1. dedup, so every later pass sees unique identifiers;
//! 2. backfill, so referenced-but-missing entries exist;
//! 3. ownership, so matching can be scoped by resolved teams;
//! 4. annotation matching, which fills descriptions and edits the instance.

use serde::Serialize;
use serde_json::Value;

use crate::backfill::{backfill_missing, BackfillReport};
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::dedup::{dedup_entries, DedupReport};
use crate::matcher::{match_annotations, MatchReport};
use crate::ownership::{resolve_ownership, OwnershipReport};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub dedup: DedupReport,
    pub backfill: BackfillReport,
    pub ownership: OwnershipReport,
    pub matching: MatchReport,
}

impl ReconcileReport {
    /// Whether the run changed either document.
    pub fn changed_catalog(&self) -> bool {
        !self.dedup.removed.is_empty()
            || !self.backfill.added.is_empty()
            || !self.matching.described.is_empty()
            || !self.ownership.assignments.is_empty()
    }

    pub fn changed_instance(&self) -> bool {
        self.matching.removed > 0
    }
}

pub fn reconcile(catalog: &mut Catalog, instance: &mut Value, config: &EngineConfig) -> ReconcileReport {
    let span = tracing::info_span!("reconcile", entries = catalog.len());
    let _guard = span.enter();

    let dedup = dedup_entries(catalog);
    let backfill = backfill_missing(catalog, instance, config);
    let ownership = resolve_ownership(catalog, instance, config);
    let matching = match_annotations(catalog, instance, config);

    ReconcileReport {
        dedup,
        backfill,
        ownership,
        matching,
    }
}
