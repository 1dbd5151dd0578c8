//! Assemble the full audit report from the two lookup outcomes.
//!
//! Everything here is pure: the caller performs the lookups and passes their
//! outcomes in, so the whole pipeline after the network boundary is testable.

use serde::Serialize;
use tracing::info;
use verihouse_core::{
    AuditRequest, AuditResult, Discrepancy, PermitLookup, PermitRecord, Prediction,
    PropertyDetails, PropertyLookup, filter_by_street_number,
};

use crate::{predictor, scanner, truth};

const SPELLING_HINT: &str =
    "Check the street spelling (e.g. \"Mission\", not \"Mission Street\") and the street number.";

/// What happened to the permit search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LookupStatus {
    Found { permits: usize },
    NoRecords { hint: String },
    ServiceError { http_status: Option<u16>, payload: String },
    ConnectionError { detail: String },
}

/// Why maintenance predictions are (or are not) present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictorStatus {
    Ran { year_built: i32 },
    /// No property API key configured.
    Disabled,
    PropertyNotFound,
    NoYearBuilt,
    Failed { detail: String },
    /// Permit history is unknown because the permit lookup failed.
    Skipped,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub address: String,
    pub lookup: LookupStatus,
    /// Permits at the exact street number, newest first.
    pub permits: Vec<PermitRecord>,
    /// Present only when permits were found.
    pub result: Option<AuditResult>,
    pub property: Option<PropertyDetails>,
    pub predictor: PredictorStatus,
    pub predictions: Vec<Prediction>,
    /// `None` when no listing text was supplied.
    pub discrepancies: Option<Vec<Discrepancy>>,
}

/// Build the report for `request` from already-completed lookups.
///
/// Permits are filtered to the exact street number first. The scanner runs
/// only when permits remain. The predictor and truth checker run on any
/// successful lookup, including an empty one, since an empty history is
/// itself evidence; after a failed lookup they are skipped.
pub fn build_report(
    request: &AuditRequest,
    permits: PermitLookup,
    property: PropertyLookup,
    as_of: i32,
) -> AuditReport {
    let address = format!(
        "{} {}",
        request.street_number.trim(),
        request.street_name.trim()
    );

    let (lookup, history) = match permits {
        PermitLookup::Found(records) => {
            let fetched = records.len();
            let matched = filter_by_street_number(records, &request.street_number);
            info!(fetched, matched = matched.len(), "filtered permits by street number");
            if matched.is_empty() {
                (no_records(), Some(matched))
            } else {
                let status = LookupStatus::Found {
                    permits: matched.len(),
                };
                (status, Some(matched))
            }
        }
        PermitLookup::NoRecords => (no_records(), Some(Vec::new())),
        PermitLookup::ServiceError { status, payload } => (
            LookupStatus::ServiceError {
                http_status: status,
                payload,
            },
            None,
        ),
        PermitLookup::ConnectionError { detail } => {
            (LookupStatus::ConnectionError { detail }, None)
        }
    };

    let result = history
        .as_deref()
        .filter(|h| !h.is_empty())
        .map(scanner::analyze);

    let (property, predictor_status, predictions) = match (property, history.as_deref()) {
        (PropertyLookup::Disabled, _) => (None, PredictorStatus::Disabled, Vec::new()),
        (PropertyLookup::NotFound, _) => (None, PredictorStatus::PropertyNotFound, Vec::new()),
        (PropertyLookup::Failed { detail }, _) => {
            (None, PredictorStatus::Failed { detail }, Vec::new())
        }
        (PropertyLookup::Found(details), None) => {
            (Some(details), PredictorStatus::Skipped, Vec::new())
        }
        (PropertyLookup::Found(details), Some(records)) => match details.year_built {
            Some(year_built) => {
                let predictions = predictor::predict_as_of(year_built, records, as_of);
                (
                    Some(details),
                    PredictorStatus::Ran { year_built },
                    predictions,
                )
            }
            None => (Some(details), PredictorStatus::NoYearBuilt, Vec::new()),
        },
    };

    let discrepancies = match (&request.listing, history.as_deref()) {
        (Some(text), Some(records)) if !text.trim().is_empty() => {
            Some(truth::check_as_of(text, records, as_of))
        }
        _ => None,
    };

    AuditReport {
        address,
        lookup,
        permits: history.unwrap_or_default(),
        result,
        property,
        predictor: predictor_status,
        predictions,
        discrepancies,
    }
}

fn no_records() -> LookupStatus {
    LookupStatus::NoRecords {
        hint: SPELLING_HINT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verihouse_core::{FindingKind, Tier};

    fn mission() -> AuditRequest {
        AuditRequest::new("301", "Mission")
    }

    fn built(year: i32) -> PropertyLookup {
        PropertyLookup::Found(PropertyDetails {
            year_built: Some(year),
            ..PropertyDetails::default()
        })
    }

    #[test]
    fn mission_street_end_to_end() {
        let records = vec![
            PermitRecord::new("INSTALL KNOB AND TUBE REWIRING", "2015").with_street_number("301"),
            PermitRecord::new("NEW ROOF INSTALLATION", "2023").with_street_number("301"),
            PermitRecord::new("UNDERPIN FOUNDATION", "2019").with_street_number("1301"),
        ];
        let report = build_report(
            &mission(),
            PermitLookup::Found(records),
            PropertyLookup::Disabled,
            2026,
        );

        assert_eq!(report.lookup, LookupStatus::Found { permits: 2 });
        let result = report.result.unwrap();
        assert_eq!(result.score, 75);
        assert_eq!(result.tier, Tier::Silver);
        assert_eq!(result.findings.len(), 2);
        assert_eq!(result.findings[0].kind, FindingKind::Risk);
        assert_eq!(result.findings[1].kind, FindingKind::Asset);
        assert_eq!(report.predictor, PredictorStatus::Disabled);
        assert!(report.predictions.is_empty());
        assert!(report.discrepancies.is_none());
    }

    #[test]
    fn prefix_matches_at_other_numbers_are_no_records() {
        let records = vec![PermitRecord::new("REROOF", "2020").with_street_number("301-305")];
        let report = build_report(
            &mission(),
            PermitLookup::Found(records),
            PropertyLookup::Disabled,
            2026,
        );
        assert!(matches!(report.lookup, LookupStatus::NoRecords { .. }));
        assert!(report.result.is_none());
        assert!(report.permits.is_empty());
    }

    #[test]
    fn empty_history_still_predicts_and_checks() {
        let request = mission().with_listing("Brand new chef's kitchen");
        let report = build_report(&request, PermitLookup::NoRecords, built(1955), 2026);

        assert!(report.result.is_none());
        assert_eq!(report.predictor, PredictorStatus::Ran { year_built: 1955 });
        assert_eq!(report.predictions.len(), 4);
        let discrepancies = report.discrepancies.unwrap();
        assert_eq!(discrepancies.len(), 1);
        assert_eq!(discrepancies[0].claim, "Remodeled Kitchen");
    }

    #[test]
    fn service_error_skips_everything_downstream() {
        let request = mission().with_listing("New roof");
        let report = build_report(
            &request,
            PermitLookup::ServiceError {
                status: None,
                payload: r#"{"error": true}"#.into(),
            },
            built(1955),
            2026,
        );
        assert_eq!(
            report.lookup,
            LookupStatus::ServiceError {
                http_status: None,
                payload: r#"{"error": true}"#.into()
            }
        );
        assert!(report.result.is_none());
        assert_eq!(report.predictor, PredictorStatus::Skipped);
        assert!(report.property.is_some());
        assert!(report.discrepancies.is_none());
    }

    #[test]
    fn connection_error_is_reported() {
        let report = build_report(
            &mission(),
            PermitLookup::ConnectionError {
                detail: "timed out".into(),
            },
            PropertyLookup::Disabled,
            2026,
        );
        assert_eq!(
            report.lookup,
            LookupStatus::ConnectionError {
                detail: "timed out".into()
            }
        );
    }

    #[test]
    fn property_outcomes_map_to_predictor_status() {
        let records = || {
            PermitLookup::Found(vec![
                PermitRecord::new("REROOF", "2020").with_street_number("301"),
            ])
        };

        let r = build_report(&mission(), records(), PropertyLookup::NotFound, 2026);
        assert_eq!(r.predictor, PredictorStatus::PropertyNotFound);

        let r = build_report(
            &mission(),
            records(),
            PropertyLookup::Found(PropertyDetails::default()),
            2026,
        );
        assert_eq!(r.predictor, PredictorStatus::NoYearBuilt);

        let r = build_report(
            &mission(),
            records(),
            PropertyLookup::Failed {
                detail: "bad json".into(),
            },
            2026,
        );
        assert!(matches!(r.predictor, PredictorStatus::Failed { .. }));
    }

    #[test]
    fn blank_listing_is_not_checked() {
        let request = mission().with_listing("   ");
        let report = build_report(&request, PermitLookup::NoRecords, PropertyLookup::Disabled, 2026);
        assert!(report.discrepancies.is_none());
    }

    #[test]
    fn report_serializes_with_tagged_status() {
        let report = build_report(&mission(), PermitLookup::NoRecords, PropertyLookup::Disabled, 2026);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["lookup"]["status"], "NO_RECORDS");
        assert_eq!(json["predictor"]["status"], "DISABLED");
        assert_eq!(json["address"], "301 Mission");
    }
}
