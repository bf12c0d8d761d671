//! Report rendering for CLI output
//!
//! Console output uses comfy-table, markdown mirrors the table layout for
//! pasting into documents, and JSON is the report serialized verbatim.

use comfy_table::presets::NOTHING;
use comfy_table::{Cell, CellAlignment, Table};
use console::style;
use langscan_core::{LangscanResult, Report};

/// Group digits in threes for readability.
fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn frameworks_line(report: &Report) -> String {
    if report.frameworks.is_empty() {
        "None".to_string()
    } else {
        report.frameworks.join(", ")
    }
}

/// Render a report as colored terminal output.
pub fn render_console(report: &Report) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} {}\n",
        style("Frameworks detected:").bold(),
        frameworks_line(report)
    ));

    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(vec![
        Cell::new("LANGUAGE"),
        Cell::new("FILES").set_alignment(CellAlignment::Right),
        Cell::new("BYTES").set_alignment(CellAlignment::Right),
        Cell::new("BYTES %").set_alignment(CellAlignment::Right),
    ]);

    for (name, stat) in &report.languages {
        table.add_row(vec![
            Cell::new(style(name).cyan().to_string()),
            Cell::new(stat.files).set_alignment(CellAlignment::Right),
            Cell::new(format_thousands(stat.bytes)).set_alignment(CellAlignment::Right),
            Cell::new(format!(
                "{}%",
                stat.bytes_percent.as_deref().unwrap_or("0.00")
            ))
            .set_alignment(CellAlignment::Right),
        ]);
    }

    out.push_str(&format!(
        "\n{}\n{}\n",
        style("Language stats:").bold(),
        table.trim_fmt()
    ));

    if !report.other.is_empty() {
        let mut other_table = Table::new();
        other_table.load_preset(NOTHING);
        other_table.set_header(vec![
            Cell::new("CATEGORY"),
            Cell::new("FILES").set_alignment(CellAlignment::Right),
            Cell::new("BYTES").set_alignment(CellAlignment::Right),
        ]);

        for (name, stat) in &report.other {
            other_table.add_row(vec![
                Cell::new(name),
                Cell::new(stat.files).set_alignment(CellAlignment::Right),
                Cell::new(format_thousands(stat.bytes)).set_alignment(CellAlignment::Right),
            ]);
        }

        out.push_str(&format!(
            "\n{}\n{}\n",
            style("Other stats:").bold(),
            other_table.trim_fmt()
        ));
    }

    out.push_str(&format!("\n{}\n", style("Totals:").bold()));
    out.push_str(&format!(
        "  Files: {}\n",
        format_thousands(report.totals.total_files)
    ));
    out.push_str(&format!(
        "  Bytes: {}\n",
        format_thousands(report.totals.total_bytes)
    ));

    if report.skipped_repos > 0 {
        out.push_str(&format!(
            "  {}\n",
            style(format!("Skipped repositories: {}", report.skipped_repos)).yellow()
        ));
    }

    out
}

/// Render a report as a Markdown document.
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "### Frameworks Detected: {}\n\n",
        frameworks_line(report)
    ));

    md.push_str("### Language Statistics\n\n");
    md.push_str("| Language           | Files    | Bytes       | Bytes % |\n");
    md.push_str("|--------------------|----------|-------------|---------|\n");
    for (name, stat) in &report.languages {
        md.push_str(&format!(
            "| {:<18} | {:<8} | {:<11} | {:<7} |\n",
            name,
            stat.files,
            format_thousands(stat.bytes),
            format!("{}%", stat.bytes_percent.as_deref().unwrap_or("0.00"))
        ));
    }

    md.push_str("\n### Other Statistics\n\n");
    md.push_str("| Category         | Files   | Bytes         |\n");
    md.push_str("|------------------|---------|---------------|\n");
    for (name, stat) in &report.other {
        md.push_str(&format!(
            "| {:<16} | {:<7} | {:<13} |\n",
            name,
            stat.files,
            format_thousands(stat.bytes)
        ));
    }

    md.push_str("\n### Totals\n\n");
    md.push_str(&format!(
        "- **Total Files**: {}\n",
        format_thousands(report.totals.total_files)
    ));
    md.push_str(&format!(
        "- **Total Bytes**: {}\n",
        format_thousands(report.totals.total_bytes)
    ));

    if report.skipped_repos > 0 {
        md.push_str(&format!(
            "- **Skipped Repositories**: {}\n",
            format_thousands(report.skipped_repos)
        ));
    }

    md
}

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &Report) -> LangscanResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use langscan_core::LanguageStat;

    fn sample_report() -> Report {
        let mut report = Report::default();
        report.frameworks.push("React".to_string());
        report.languages.insert(
            "JavaScript".to_string(),
            LanguageStat {
                files: 3,
                bytes: 12_500,
                bytes_percent: Some("62.50".to_string()),
            },
        );
        report.languages.insert(
            "Python".to_string(),
            LanguageStat {
                files: 1,
                bytes: 7_500,
                bytes_percent: Some("37.50".to_string()),
            },
        );
        report.other.insert(
            "Markdown".to_string(),
            LanguageStat {
                files: 1,
                bytes: 800,
                bytes_percent: None,
            },
        );
        report.totals.total_files = 5;
        report.totals.language_bytes = 20_000;
        report.totals.other_bytes = 800;
        report.totals.total_bytes = 20_800;
        report
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_render_markdown_layout() {
        let md = render_markdown(&sample_report());

        assert!(md.contains("### Frameworks Detected: React"));
        assert!(md.contains("| JavaScript"));
        assert!(md.contains("62.50%"));
        assert!(md.contains("| Markdown"));
        assert!(md.contains("- **Total Files**: 5"));
        assert!(md.contains("- **Total Bytes**: 20,800"));
        assert!(!md.contains("Skipped"));
    }

    #[test]
    fn test_render_markdown_reports_skipped_repos() {
        let mut report = sample_report();
        report.skipped_repos = 2;

        let md = render_markdown(&report);
        assert!(md.contains("- **Skipped Repositories**: 2"));
    }

    #[test]
    fn test_render_console_contains_tables_and_totals() {
        let text = render_console(&sample_report());

        assert!(text.contains("JavaScript"));
        assert!(text.contains("12,500"));
        assert!(text.contains("Markdown"));
        assert!(text.contains("Files: 5"));
        assert!(text.contains("Bytes: 20,800"));
    }

    #[test]
    fn test_render_json_keeps_wire_names() {
        let json = render_json(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totals"]["totalFiles"], 5);
        assert_eq!(value["languages"]["JavaScript"]["bytesPercent"], "62.50");
        assert_eq!(value["skippedRepos"], 0);
    }

    #[test]
    fn test_render_empty_report() {
        let report = Report::default();

        let md = render_markdown(&report);
        assert!(md.contains("Frameworks Detected: None"));

        let text = render_console(&report);
        assert!(text.contains("Frameworks detected:"));
        assert!(text.contains("Files: 0"));
    }
}
