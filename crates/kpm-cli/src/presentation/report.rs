//! Text rendering of resolution reports and identifier records.

use std::fmt::Write;

use kpm_core::{PluginIdentifier, ResolutionReport, Tier};

/// Render a resolution report for the terminal.
pub fn format_report(plugin_key: &str, report: &ResolutionReport) -> String {
    let mut out = String::new();
    match &report.coordinate {
        Some(coordinate) => {
            let _ = writeln!(out, "{plugin_key}: {coordinate}");
            if let Some(tier) = report.decided_by {
                let _ = writeln!(out, "  decided by: {tier}");
            }
        }
        None => {
            let _ = writeln!(out, "{plugin_key}: unresolved");
        }
    }
    if !report.contributors.is_empty() {
        let tiers: Vec<&str> = report.contributors.iter().copied().map(Tier::as_str).collect();
        let _ = writeln!(out, "  sources:    {}", tiers.join(", "));
    }
    for failure in &report.degraded {
        let _ = writeln!(out, "  warning:    {} failed: {}", failure.tier, failure.message);
    }
    out
}

/// Render one identifier record as `field: value` lines.
pub fn format_identifier(record: &PluginIdentifier) -> String {
    let fields = [
        ("plugin_name", record.plugin_name.as_deref()),
        ("group_id", record.group_id.as_deref()),
        ("artifact_id", record.artifact_id.as_deref()),
        ("packaging", record.packaging.as_deref()),
        ("classifier", record.classifier.as_deref()),
        ("version", record.version.as_deref()),
        ("language", record.language.as_deref()),
    ];

    let mut out = format!("{}\n", record.plugin_key);
    for (name, value) in fields {
        if let Some(value) = value {
            let _ = writeln!(out, "  {name:<12} {value}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpm_core::{Coordinate, SourceFailure};

    #[test]
    fn test_format_resolved_report() {
        let report = ResolutionReport {
            coordinate: Some(Coordinate::new("stripe-plugin", "7.0.0")),
            decided_by: Some(Tier::Catalog),
            contributors: vec![Tier::Catalog],
            degraded: vec![SourceFailure {
                tier: Tier::IdentifierStore,
                message: "disk full".to_string(),
            }],
        };

        let text = format_report("stripe", &report);

        assert!(text.starts_with("stripe: "));
        assert!(text.contains("stripe-plugin"));
        assert!(text.contains("decided by: catalog"));
        assert!(text.contains("identifier_store failed: disk full"));
    }

    #[test]
    fn test_format_unresolved_report() {
        let text = format_report("mystery", &ResolutionReport::default());
        assert_eq!(text, "mystery: unresolved\n");
    }

    #[test]
    fn test_format_identifier_skips_unset_fields() {
        let record = PluginIdentifier::new(
            "stripe",
            Some("stripe-plugin".to_string()),
            Some("7.0.0".to_string()),
        )
        .with_language("java");

        let text = format_identifier(&record);

        assert!(text.starts_with("stripe\n"));
        assert!(text.contains("artifact_id"));
        assert!(text.contains("java"));
        assert!(!text.contains("classifier"));
    }
}
