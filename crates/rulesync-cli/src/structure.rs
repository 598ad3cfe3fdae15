//! `rulesync check-structure`: shape comparison of a source document and a
//! localized copy.

use std::path::Path;

use anyhow::{anyhow, Result};
use colored::Colorize;

use rulesync_shape::{validate_structure, ShapeReport, SideLabels};

use crate::documents::load_json;

pub struct CheckStructureArgs<'a> {
    pub source: &'a Path,
    pub target: &'a Path,
    pub limit: usize,
    pub format: &'a str,
    pub labels: SideLabels,
}

pub fn cmd_check_structure(args: CheckStructureArgs<'_>) -> Result<()> {
    let format = args.format.trim().to_ascii_lowercase();
    if !matches!(format.as_str(), "text" | "json") {
        return Err(anyhow!("unknown --format `{format}` (expected text|json)"));
    }

    let source = load_json(args.source)?;
    let target = load_json(args.target)?;
    let report = validate_structure(&source, &target, args.labels);
    tracing::debug!(diagnostics = report.diagnostics.len(), "compared document structure");

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{}", render_text(&report, args.source, args.target, args.limit)),
    }

    if report.is_equivalent() {
        Ok(())
    } else {
        Err(anyhow!(
            "structure validation failed: {} difference(s)",
            report.diagnostics.len()
        ))
    }
}

pub fn render_text(report: &ShapeReport, source: &Path, target: &Path, limit: usize) -> String {
    if report.is_equivalent() {
        return format!(
            "{} {} structure matches {}\n",
            "[OK]".green().bold(),
            target.display(),
            source.display()
        );
    }

    let lines = report.lines();
    let mut out = format!(
        "{} Structure validation failed for {}\nFound {} structural differences:\n\n",
        "[ERROR]".red().bold(),
        target.display(),
        lines.len()
    );
    for line in lines.iter().take(limit) {
        out.push_str(&format!("  - {line}\n"));
    }
    if lines.len() > limit {
        out.push_str(&format!("\n  ... and {} more errors\n", lines.len() - limit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulesync_shape::validate_structure;
    use serde_json::json;

    #[test]
    fn text_output_truncates_but_counts_everything() {
        colored::control::set_override(false);
        let a = json!({"a": 1, "b": 1, "c": 1});
        let b = json!({});
        let report = validate_structure(&a, &b, SideLabels::new("English", "Translation"));
        let text = render_text(&report, Path::new("teams.json"), Path::new("teams.fr.json"), 2);

        assert!(text.starts_with("[ERROR] Structure validation failed for teams.fr.json"));
        assert!(text.contains("Found 3 structural differences"));
        assert!(text.contains("  - a: Missing in Translation\n"));
        assert!(text.contains("  - b: Missing in Translation\n"));
        assert!(!text.contains("  - c:"));
        assert!(text.contains("... and 1 more errors"));
    }

    #[test]
    fn text_output_for_clean_report() {
        colored::control::set_override(false);
        let v = json!({"a": [1]});
        let report = validate_structure(&v, &v, SideLabels::default());
        let text = render_text(&report, Path::new("en.json"), Path::new("fr.json"), 50);
        assert_eq!(text, "[OK] fr.json structure matches en.json\n");
    }
}
