//! Frameworks command handler.
//!
//! Lists the frameworks available to assessments.

use super::sources::load_registry;
use crate::config::AppConfig;
use crate::pipeline::{auto_detect_format, exit_codes, write_output, OutputTarget};
use crate::registry::SchemaRegistry;
use crate::reports::ReportFormat;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct FrameworkListing<'a> {
    id: &'a str,
    name: &'a str,
    categories: usize,
    criteria: usize,
    weight_sum: f64,
}

fn listings(registry: &SchemaRegistry) -> Vec<FrameworkListing<'_>> {
    registry
        .frameworks()
        .map(|f| FrameworkListing {
            id: &f.id,
            name: &f.name,
            categories: f.categories.len(),
            criteria: f.criterion_count(),
            weight_sum: f.weight_sum(),
        })
        .collect()
}

fn format_table(rows: &[FrameworkListing<'_>]) -> String {
    let mut lines = vec![format!(
        "{:<10} {:<44} {:>10} {:>8} {:>7}",
        "ID", "NAME", "CATEGORIES", "CRITERIA", "WEIGHT"
    )];
    for row in rows {
        lines.push(format!(
            "{:<10} {:<44} {:>10} {:>8} {:>7.2}",
            row.id, row.name, row.categories, row.criteria, row.weight_sum
        ));
    }
    lines.join("\n")
}

/// Run the frameworks command, returning the desired exit code.
pub fn run_frameworks(config: &AppConfig) -> Result<i32> {
    let registry = load_registry(config)?;
    let rows = listings(&registry);

    let target = OutputTarget::from_option(config.output.file.clone());
    let content = match auto_detect_format(config.output.format, &target) {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&rows).context("Failed to serialize framework list")?
        }
        ReportFormat::Auto | ReportFormat::Summary => format_table(&rows),
    };

    write_output(&content, &target, config.behavior.quiet)?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listings() {
        let registry = SchemaRegistry::builtin().unwrap();
        let rows = listings(&registry);
        let nsrf = rows.iter().find(|r| r.id == "nsrf").unwrap();
        assert_eq!(nsrf.categories, 3);
        assert_eq!(nsrf.criteria, 10);
        assert!((nsrf.weight_sum - 1.0).abs() < 1e-9);

        let table = format_table(&rows);
        assert!(table.starts_with("ID"));
        assert!(table.contains("iesg"));
    }
}
