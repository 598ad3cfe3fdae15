//! Text rendering of pass reports.

use colored::Colorize;

use rulesync_core::{BackfillReport, DedupReport, MatchReport, OwnershipReport, ReconcileReport};

fn team_label(team: Option<&str>) -> &str {
    team.unwrap_or("null")
}

pub fn render_dedup(r: &DedupReport) -> String {
    if r.groups.is_empty() {
        return format!(
            "No duplicate IDs found. All IDs are unique.\nTotal entries: {}\n",
            r.remaining
        );
    }
    let mut out = format!("Found {} duplicate IDs:\n", r.groups.len());
    for g in &r.groups {
        out.push_str(&format!("  {}: appears {} times\n", g.id.bold(), g.count));
        for o in &g.occurrences {
            out.push_str(&format!(
                "    Entry {}: name={}, team={}\n",
                o.index,
                o.name,
                team_label(o.team.as_deref())
            ));
        }
    }
    out.push('\n');
    for d in &r.removed {
        out.push_str(&format!(
            "{} duplicate: {} (name: {}, kept entry {})\n",
            "Removing".yellow(),
            d.id,
            d.name,
            d.kept_index
        ));
    }
    out.push_str(&format!(
        "\nRemoved {} duplicate entries\nTotal entries after cleanup: {}\n",
        r.removed.len(),
        r.remaining
    ));
    out
}

pub fn render_backfill(r: &BackfillReport) -> String {
    let mut out = format!("Added {} new catalog entries\n", r.added.len());
    for e in &r.added {
        out.push_str(&format!(
            "  {} {} - {} (variable: {})\n",
            "+".green(),
            e.id,
            e.name,
            e.variable
        ));
    }
    out
}

pub fn render_matching(r: &MatchReport) -> String {
    let mut out = format!(
        "Matched {} annotations ({} unmatched)\n",
        r.matched.len(),
        r.unmatched
    );
    for (id, source) in &r.described {
        out.push_str(&format!("  Updated description for {id} (from {source})\n"));
    }
    for m in &r.matched {
        out.push_str(&format!(
            "  {} annotation {} (matching {})\n",
            "Removed".yellow(),
            m.annotation_name,
            m.entry_id
        ));
    }
    out.push_str(&format!("Removed {} annotations\n", r.removed));
    out
}

pub fn render_ownership(r: &OwnershipReport) -> String {
    let mut out = format!(
        "Updated {} catalog entries\n  Shared (team: null): {}\n  Team-specific: {}\n",
        r.total, r.shared, r.team_specific
    );
    for a in &r.ambiguous {
        out.push_str(&format!(
            "  {} {} used by {} → {}\n",
            "note:".cyan(),
            a.id,
            a.scopes.join(", "),
            team_label(a.assigned.as_deref())
        ));
    }
    out
}

pub fn render_reconcile(r: &ReconcileReport) -> String {
    let mut out = String::new();
    for (title, body) in [
        ("dedup", render_dedup(&r.dedup)),
        ("backfill", render_backfill(&r.backfill)),
        ("ownership", render_ownership(&r.ownership)),
        ("matching", render_matching(&r.matching)),
    ] {
        out.push_str(&format!("{}\n", title.bold()));
        for line in body.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out
}
