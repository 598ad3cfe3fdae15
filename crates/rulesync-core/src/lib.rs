//! Rulesync core: keep a rule catalog and the instance document that uses it
//! consistent.
//!
//! ```text
//!   catalog.json                          instance.json
//!   { weapon_rules: [ {id, name, ..} ] }  { .. killteamId .. WR: [{id}] .. abilities: [..] }
//!          │                                      │
//!          ├── dedup ─────────── keep-first by id │
//!          ├── backfill ◄─────── unknown refs ────┤
//!          ├── ownership ◄────── ref scopes ──────┤
//!          └── matching ◄──────► annotations ─────┘ (descriptions in, annotations out)
//! ```
//!
//! Every pass works on an in-memory snapshot and returns a serializable
//! report. Nothing here reads or writes files.

pub mod backfill;
pub mod catalog;
pub mod config;
pub mod dedup;
pub mod error;
pub mod ident;
pub mod matcher;
pub mod ownership;
pub mod pipeline;
pub mod references;
pub mod walk;

pub use backfill::{backfill_missing, synthesize_entry, BackfillReport, NameSource, SynthesizedEntry};
pub use catalog::{Catalog, CatalogEntry};
pub use config::{
    ContestedPolicy, DocumentKeys, EngineConfig, IdScheme, OwnershipPolicy, UnobservedPolicy,
};
pub use dedup::{dedup_entries, find_duplicates, DedupReport, DuplicateGroup, DuplicateIdentifier};
pub use error::{Result, RulesyncError};
pub use matcher::{match_annotations, MatchIndex, MatchReport, MatchedAnnotation};
pub use ownership::{
    resolve_ownership, resolve_team, AmbiguousOwnership, OwnershipAssignment, OwnershipBasis,
    OwnershipReport,
};
pub use pipeline::{reconcile, ReconcileReport};
pub use references::{collect_references, Reference, ReferenceIndex, UnknownReference};
pub use walk::TreeWalker;
