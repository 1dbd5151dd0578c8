//! Vertical card display for audit reports.
//!
//! Renders a report as grouped, human-readable sections: score, risks,
//! verified assets, maintenance outlook, listing check, and permit history.

use std::fmt;

use verihouse_audit::{AuditReport, LookupStatus, PredictorStatus};
use verihouse_core::{PermitLookup, PermitRecord};

const MAX_PERMITS: usize = 15;
const MAX_DESCRIPTION: usize = 70;
const MAX_PAYLOAD: usize = 400;

// ── Public API ──

pub fn print_audit_card(report: &AuditReport) {
    print!("{}", AuditCard(report));
}

pub fn print_recent(lookup: &PermitLookup) {
    print!("{}", RecentTable(lookup));
}

/// Render an audit report as a vertical card.
pub fn render_audit_card(report: &AuditReport) -> String {
    AuditCard(report).to_string()
}

/// Render the newest citywide permits as a table.
pub fn render_recent(lookup: &PermitLookup) -> String {
    RecentTable(lookup).to_string()
}

// ── Card ──

struct AuditCard<'a>(&'a AuditReport);

impl fmt::Display for AuditCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "=== {} ===", report.address)?;
        writeln!(f)?;

        match &report.lookup {
            LookupStatus::Found { permits } => {
                writeln!(f, "{permits} permit(s) on record")?;
            }
            LookupStatus::NoRecords { hint } => {
                writeln!(f, "No permit records found for this address.")?;
                writeln!(f, "{hint}")?;
            }
            LookupStatus::ServiceError {
                http_status,
                payload,
            } => {
                let status = http_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unexpected response".to_string());
                writeln!(f, "Permit service error ({status}):")?;
                writeln!(f, "  {}", truncate(payload, MAX_PAYLOAD))?;
            }
            LookupStatus::ConnectionError { detail } => {
                writeln!(f, "Could not reach the permit service: {detail}")?;
            }
        }
        writeln!(f)?;

        if let Some(result) = &report.result {
            section(f, "Score")?;
            row(f, "score", &format!("{}/100", result.score))?;
            row(f, "tier", result.tier.as_str())?;
            writeln!(f)?;

            let risks: Vec<_> = result.risks().collect();
            if !risks.is_empty() {
                section(f, "Risks")?;
                for r in risks {
                    let category = r.category.map(|c| c.as_str()).unwrap_or("-");
                    writeln!(f, "  -{:<3} [{:<9}] {}", r.deduction, category, r.message)?;
                }
                writeln!(f)?;
            }

            let assets: Vec<_> = result.assets().collect();
            if !assets.is_empty() {
                section(f, "Verified Assets")?;
                for a in assets {
                    writeln!(f, "  + {}", a.message)?;
                }
                writeln!(f)?;
            }
        }

        if let Some(property) = &report.property {
            section(f, "Property")?;
            if let Some(v) = &property.formatted_address {
                row(f, "address", v)?;
            }
            if let Some(v) = property.year_built {
                row(f, "year_built", &v.to_string())?;
            }
            if let Some(v) = property.square_footage {
                row(f, "square_footage", &v.to_string())?;
            }
            if let Some(v) = &property.property_type {
                row(f, "property_type", v)?;
            }
            if let Some(v) = &property.last_sale_date {
                row(f, "last_sale_date", v.get(..10).unwrap_or(v.as_str()))?;
            }
            writeln!(f)?;
        }

        section(f, "Maintenance Outlook")?;
        match &report.predictor {
            PredictorStatus::Ran { .. } if report.predictions.is_empty() => {
                writeln!(f, "  No major systems flagged.")?;
            }
            PredictorStatus::Ran { .. } => {
                for p in &report.predictions {
                    writeln!(
                        f,
                        "  {:<6} {} ({})",
                        p.probability.as_str(),
                        p.item,
                        p.estimated_cost_range
                    )?;
                    writeln!(f, "         {}", p.reason)?;
                }
            }
            PredictorStatus::Disabled => {
                writeln!(f, "  Disabled: set RENTCAST_API_KEY to enable.")?;
            }
            PredictorStatus::PropertyNotFound => {
                writeln!(f, "  Property details not found.")?;
            }
            PredictorStatus::NoYearBuilt => {
                writeln!(f, "  Year built unknown.")?;
            }
            PredictorStatus::Failed { detail } => {
                writeln!(f, "  Property lookup failed: {detail}")?;
            }
            PredictorStatus::Skipped => {
                writeln!(f, "  Skipped: permit history unavailable.")?;
            }
        }
        writeln!(f)?;

        if let Some(discrepancies) = &report.discrepancies {
            section(f, "Listing Check")?;
            if discrepancies.is_empty() {
                writeln!(f, "  All listing claims are backed by recent permits.")?;
            }
            for d in discrepancies {
                writeln!(f, "  {:<12} {}", d.status.as_str(), d.claim)?;
                writeln!(f, "               {}", d.message)?;
            }
            writeln!(f)?;
        }

        if !report.permits.is_empty() {
            section(f, "Permit History")?;
            for r in report.permits.iter().take(MAX_PERMITS) {
                writeln!(
                    f,
                    "  {:<10} {}",
                    r.date_label(),
                    truncate(&r.description, MAX_DESCRIPTION)
                )?;
            }
            if report.permits.len() > MAX_PERMITS {
                writeln!(f, "  ... ({} more)", report.permits.len() - MAX_PERMITS)?;
            }
        }

        Ok(())
    }
}

// ── Recent permits ──

struct RecentTable<'a>(&'a PermitLookup);

impl fmt::Display for RecentTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            PermitLookup::Found(records) => {
                writeln!(f, "Downloaded {} recent permits.", records.len())?;
                writeln!(
                    f,
                    "{:<8} {:<20} {:<6} {:<10} description",
                    "number", "street_name", "suffix", "created"
                )?;
                for r in records {
                    recent_row(f, r)?;
                }
                writeln!(f)?;
                writeln!(
                    f,
                    "Use the street_name spelling above (without the suffix) when auditing."
                )
            }
            PermitLookup::NoRecords => {
                writeln!(f, "Connection succeeded, but the list was empty.")
            }
            PermitLookup::ServiceError { payload, .. } => {
                writeln!(f, "Permit service error:")?;
                writeln!(f, "  {}", truncate(payload, MAX_PAYLOAD))
            }
            PermitLookup::ConnectionError { detail } => {
                writeln!(f, "Connection error: {detail}")
            }
        }
    }
}

// ── Row rendering ──

fn section(f: &mut fmt::Formatter<'_>, header: &str) -> fmt::Result {
    writeln!(f, "{header}")
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "  {label:<26} {value}")
}

fn recent_row(f: &mut fmt::Formatter<'_>, r: &PermitRecord) -> fmt::Result {
    writeln!(
        f,
        "{:<8} {:<20} {:<6} {:<10} {}",
        r.street_number,
        r.street_name,
        r.street_suffix,
        r.date_label(),
        truncate(&r.description, MAX_DESCRIPTION)
    )
}

/// Truncate to `max` characters, appending an ellipsis when cut.
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verihouse_audit::build_report;
    use verihouse_core::{AuditRequest, PropertyLookup};

    #[test]
    fn card_shows_score_and_findings() {
        let records = vec![
            PermitRecord::new("INSTALL KNOB AND TUBE REWIRING", "2015").with_street_number("301"),
            PermitRecord::new("NEW ROOF INSTALLATION", "2023").with_street_number("301"),
        ];
        let report = build_report(
            &AuditRequest::new("301", "Mission"),
            PermitLookup::Found(records),
            PropertyLookup::Disabled,
            2026,
        );
        let card = render_audit_card(&report);
        assert!(card.starts_with("=== 301 Mission ==="));
        assert!(card.contains("75/100"));
        assert!(card.contains("SILVER"));
        assert!(card.contains("Knob & tube wiring referenced in 2015 permit"));
        assert!(card.contains("Verified: New roof (2023)"));
        assert!(card.contains("RENTCAST_API_KEY"));
        assert!(!card.contains("Listing Check"));
    }

    #[test]
    fn card_distinguishes_no_records_from_errors() {
        let request = AuditRequest::new("301", "Misson");
        let empty = render_audit_card(&build_report(
            &request,
            PermitLookup::NoRecords,
            PropertyLookup::Disabled,
            2026,
        ));
        assert!(empty.contains("No permit records found"));
        assert!(!empty.contains("Score"));

        let failed = render_audit_card(&build_report(
            &request,
            PermitLookup::ServiceError {
                status: Some(400),
                payload: r#"{"message": "query.soql.no-such-column"}"#.into(),
            },
            PropertyLookup::Disabled,
            2026,
        ));
        assert!(failed.contains("Permit service error (400)"));
        assert!(failed.contains("no-such-column"));
    }

    #[test]
    fn long_history_is_capped() {
        let records: Vec<_> = (0..17)
            .map(|i| PermitRecord::new(format!("REPAIR {i}"), "2020").with_street_number("301"))
            .collect();
        let report = build_report(
            &AuditRequest::new("301", "Mission"),
            PermitLookup::Found(records),
            PropertyLookup::NotFound,
            2026,
        );
        let card = render_audit_card(&report);
        assert_eq!(card, AuditCard(&report).to_string());
        assert!(card.contains("REPAIR 14"));
        assert!(!card.contains("REPAIR 15"));
        assert!(card.contains("  ... (2 more)"));
        assert!(card.contains("Property details not found."));
    }

    #[test]
    fn recent_table_lists_addresses() {
        let mut record = PermitRecord::new("REPLACE WINDOWS", "2026-10-01T00:00:00.000");
        record.street_number = "1455".into();
        record.street_name = "MARKET".into();
        record.street_suffix = "ST".into();
        let table = render_recent(&PermitLookup::Found(vec![record]));
        assert!(table.contains("Downloaded 1 recent permits."));
        assert!(table.contains("MARKET"));
        assert!(table.contains("2026-10-01"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc…");
        assert_eq!(truncate("ééééé", 2), "éé…");
    }
}
