//! Catalog maintenance commands (dedup, backfill, match, ownership, reconcile).
//!
//! Each command loads every document it needs up front, runs one pass (or the
//! full pipeline) in memory, prints a summary, and writes changed documents
//! back unless `--dry-run` is set.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use rulesync_core::{
    backfill_missing, dedup_entries, match_annotations, reconcile, resolve_ownership, EngineConfig,
};

use crate::documents::{load_catalog, load_json, write_catalog, write_json};
use crate::render;

pub struct Documents<'a> {
    pub catalog: &'a Path,
    pub instance: &'a Path,
}

fn wrote(path: &Path, dry_run: bool) {
    if dry_run {
        println!("  {} {} (dry run, not written)", "·".dimmed(), path.display());
    } else {
        println!("  {} {}", "→".cyan(), path.display());
    }
}

pub fn cmd_dedup(catalog_path: &Path, dry_run: bool, config: &EngineConfig) -> Result<()> {
    let mut catalog = load_catalog(catalog_path, config)?;
    let report = dedup_entries(&mut catalog);
    print!("{}", render::render_dedup(&report));

    if !report.is_clean() {
        if !dry_run {
            write_catalog(catalog_path, &catalog)?;
        }
        wrote(catalog_path, dry_run);
    }
    Ok(())
}

pub fn cmd_backfill(docs: Documents<'_>, dry_run: bool, config: &EngineConfig) -> Result<()> {
    let mut catalog = load_catalog(docs.catalog, config)?;
    let instance = load_json(docs.instance)?;

    let report = backfill_missing(&mut catalog, &instance, config);
    print!("{}", render::render_backfill(&report));

    if !report.added.is_empty() {
        if !dry_run {
            write_catalog(docs.catalog, &catalog)?;
        }
        wrote(docs.catalog, dry_run);
    }
    Ok(())
}

pub fn cmd_match(docs: Documents<'_>, dry_run: bool, config: &EngineConfig) -> Result<()> {
    let mut catalog = load_catalog(docs.catalog, config)?;
    let mut instance = load_json(docs.instance)?;

    let report = match_annotations(&mut catalog, &mut instance, config);
    print!("{}", render::render_matching(&report));

    if !report.described.is_empty() {
        if !dry_run {
            write_catalog(docs.catalog, &catalog)?;
        }
        wrote(docs.catalog, dry_run);
    }
    if report.removed > 0 {
        if !dry_run {
            write_json(docs.instance, &instance)?;
        }
        wrote(docs.instance, dry_run);
    }
    Ok(())
}

pub fn cmd_resolve_ownership(docs: Documents<'_>, dry_run: bool, config: &EngineConfig) -> Result<()> {
    let mut catalog = load_catalog(docs.catalog, config)?;
    let instance = load_json(docs.instance)?;

    let report = resolve_ownership(&mut catalog, &instance, config);
    print!("{}", render::render_ownership(&report));

    if !dry_run {
        write_catalog(docs.catalog, &catalog)?;
    }
    wrote(docs.catalog, dry_run);
    Ok(())
}

pub fn cmd_reconcile(
    docs: Documents<'_>,
    dry_run: bool,
    report_out: Option<&Path>,
    config: &EngineConfig,
) -> Result<()> {
    let mut catalog = load_catalog(docs.catalog, config)?;
    let mut instance = load_json(docs.instance)?;

    let report = reconcile(&mut catalog, &mut instance, config);
    print!("{}", render::render_reconcile(&report));

    if report.changed_catalog() {
        if !dry_run {
            write_catalog(docs.catalog, &catalog)?;
        }
        wrote(docs.catalog, dry_run);
    }
    if report.changed_instance() {
        if !dry_run {
            write_json(docs.instance, &instance)?;
        }
        wrote(docs.instance, dry_run);
    }
    if let Some(path) = report_out {
        write_json(path, &serde_json::to_value(&report)?)?;
        println!("  {} {} (report)", "→".cyan(), path.display());
    }
    Ok(())
}
