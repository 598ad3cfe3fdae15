//! Rulesync CLI
//!
//! Command-line surface for:
//! - checking that a localized JSON document kept its source's structure
//! - maintaining a rule catalog against the instance document that uses it
//!   (dedup, backfill, annotation matching, ownership, or all at once)

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rulesync_shape::SideLabels;

mod catalog_cmds;
mod documents;
mod render;
mod structure;

use catalog_cmds::Documents;

#[derive(Parser)]
#[command(name = "rulesync")]
#[command(
    author,
    version,
    about = "Rulesync: keep a rule catalog and its instance data consistent"
)]
struct Cli {
    /// Engine config (JSON). Missing fields use built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug). `RUST_LOG` wins when set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DocumentArgs {
    /// Catalog document (e.g. `weapon_rules.json`).
    #[arg(long)]
    catalog: PathBuf,
    /// Instance document (e.g. `teams.json`).
    #[arg(long)]
    instance: PathBuf,
    /// Report changes without writing any file.
    #[arg(long)]
    dry_run: bool,
}

impl DocumentArgs {
    fn documents(&self) -> Documents<'_> {
        Documents {
            catalog: &self.catalog,
            instance: &self.instance,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check that `target` has the same structure as `source` (leaf values ignored).
    ///
    /// Exits non-zero when any structural difference is found.
    CheckStructure {
        /// Source document (e.g. `teams.json`).
        source: PathBuf,
        /// Localized document (e.g. `teams.fr.json`).
        target: PathBuf,
        /// Maximum number of differences printed in text mode.
        #[arg(long, default_value_t = 50)]
        limit: usize,
        /// Output format: text|json
        #[arg(long, default_value = "text")]
        format: String,
        /// Name used for the source document in messages.
        #[arg(long, default_value = "source")]
        source_label: String,
        /// Name used for the target document in messages.
        #[arg(long, default_value = "target")]
        target_label: String,
    },

    /// Remove catalog entries whose id repeats an earlier entry (first one wins).
    Dedup {
        /// Catalog document.
        #[arg(long)]
        catalog: PathBuf,
        /// Report duplicates without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Add default catalog entries for ids referenced by the instance but missing from the catalog.
    Backfill(DocumentArgs),

    /// Match inline annotations to catalog entries, copy descriptions, remove the annotations.
    MatchAnnotations(DocumentArgs),

    /// Assign each catalog entry to the scope that uses it, or mark it shared.
    ResolveOwnership(DocumentArgs),

    /// Run dedup, backfill, ownership and annotation matching in order.
    Reconcile {
        #[command(flatten)]
        docs: DocumentArgs,
        /// Also write the full run report (JSON) here.
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = documents::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::CheckStructure {
            source,
            target,
            limit,
            format,
            source_label,
            target_label,
        } => structure::cmd_check_structure(structure::CheckStructureArgs {
            source: &source,
            target: &target,
            limit,
            format: &format,
            labels: SideLabels::new(&source_label, &target_label),
        }),
        Commands::Dedup { catalog, dry_run } => catalog_cmds::cmd_dedup(&catalog, dry_run, &config),
        Commands::Backfill(args) => {
            catalog_cmds::cmd_backfill(args.documents(), args.dry_run, &config)
        }
        Commands::MatchAnnotations(args) => {
            catalog_cmds::cmd_match(args.documents(), args.dry_run, &config)
        }
        Commands::ResolveOwnership(args) => {
            catalog_cmds::cmd_resolve_ownership(args.documents(), args.dry_run, &config)
        }
        Commands::Reconcile { docs, report } => {
            catalog_cmds::cmd_reconcile(docs.documents(), docs.dry_run, report.as_deref(), &config)
        }
    }
}
