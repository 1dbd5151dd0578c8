//! Risk and asset scanning over permit descriptions.

use verihouse_core::{AuditResult, Finding, FindingKind, PermitRecord, Tier};

use crate::rules::{ASSET_RULES, RISK_RULES};

/// Score every record start from this baseline.
pub const BASELINE_SCORE: u32 = 100;

/// Scan permit descriptions against the risk and asset tables.
///
/// Each matching risk rule subtracts its deduction once per record; the score
/// is clamped at zero. Findings are ordered by record, then risk rules, then
/// asset rules. Records without a parseable date are still scanned and
/// reported with year `N/A`.
pub fn analyze(records: &[PermitRecord]) -> AuditResult {
    let mut score = BASELINE_SCORE as i64;
    let mut findings = Vec::new();

    for record in records {
        let upper = record.upper_description();
        if upper.trim().is_empty() {
            continue;
        }
        let year = record.year_label();

        for rule in RISK_RULES.iter().filter(|r| r.pattern.matches(&upper)) {
            score -= rule.deduction as i64;
            findings.push(Finding {
                kind: FindingKind::Risk,
                category: Some(rule.category),
                deduction: rule.deduction,
                message: rule.message.replace("{year}", &year),
                year_or_date: year.clone(),
            });
        }

        for rule in ASSET_RULES.iter().filter(|r| r.pattern.matches(&upper)) {
            findings.push(Finding {
                kind: FindingKind::Asset,
                category: None,
                deduction: 0,
                message: format!("Verified: {} ({year})", rule.label),
                year_or_date: year.clone(),
            });
        }
    }

    let score = score.max(0) as u32;
    AuditResult {
        score,
        tier: Tier::from_score(score),
        findings,
    }
}
