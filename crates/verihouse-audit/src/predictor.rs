//! Maintenance prediction from building age and permit history.
//!
//! Each rule is evaluated independently against the combined, upper-cased
//! text of every permit description.

use verihouse_core::{PermitRecord, Prediction, Probability, current_year};

/// Window for a roof permit to count as recent.
pub const ROOF_WINDOW_YEARS: i32 = 20;

/// Predict maintenance items relative to the current calendar year.
pub fn predict(year_built: i32, records: &[PermitRecord]) -> Vec<Prediction> {
    predict_as_of(year_built, records, current_year())
}

/// Predict maintenance items relative to `as_of`.
pub fn predict_as_of(year_built: i32, records: &[PermitRecord], as_of: i32) -> Vec<Prediction> {
    let history = records
        .iter()
        .map(PermitRecord::upper_description)
        .collect::<Vec<_>>()
        .join(" | ");
    let mentions = |words: &[&str]| words.iter().any(|w| history.contains(w));

    let mut predictions = Vec::new();

    if year_built < 1960 && !mentions(&["REWIRE", "PANEL"]) {
        predictions.push(Prediction {
            item: "Full electrical rewire".into(),
            probability: Probability::High,
            estimated_cost_range: "$15,000 - $30,000".into(),
            reason: format!(
                "Built in {year_built}; no rewire or panel permit on record. Original wiring is likely past its service life."
            ),
        });
    }

    if year_built < 1975 && !mentions(&["COPPER", "REPIPE"]) {
        predictions.push(Prediction {
            item: "Galvanized pipe replacement".into(),
            probability: Probability::Medium,
            estimated_cost_range: "$8,000 - $15,000".into(),
            reason: format!(
                "Built in {year_built}; no copper or repipe permit on record. Galvanized supply lines corrode from the inside."
            ),
        });
    }

    let recent_roof = records
        .iter()
        .any(|r| r.is_within(ROOF_WINDOW_YEARS, as_of) && r.upper_description().contains("ROOF"));
    if !recent_roof {
        predictions.push(Prediction {
            item: "Roof replacement".into(),
            probability: Probability::High,
            estimated_cost_range: "$15,000 - $25,000".into(),
            reason: format!(
                "No roof permit in the last {ROOF_WINDOW_YEARS} years. Typical roof life is 20-25 years."
            ),
        });
    }

    if year_built < 1980 && !mentions(&["SEWER", "LATERAL"]) {
        predictions.push(Prediction {
            item: "Sewer lateral replacement".into(),
            probability: Probability::Medium,
            estimated_cost_range: "$5,000 - $12,000".into(),
            reason: format!(
                "Built in {year_built}; no sewer lateral permit on record. Older clay laterals crack and root over time."
            ),
        });
    }

    predictions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(predictions: &[Prediction]) -> Vec<&str> {
        predictions.iter().map(|p| p.item.as_str()).collect()
    }

    #[test]
    fn old_house_without_history_flags_everything() {
        let p = predict_as_of(1955, &[], 2026);
        assert_eq!(
            items(&p),
            vec![
                "Full electrical rewire",
                "Galvanized pipe replacement",
                "Roof replacement",
                "Sewer lateral replacement",
            ]
        );
        assert_eq!(p[0].probability, Probability::High);
        assert_eq!(p[1].probability, Probability::Medium);
    }

    #[test]
    fn panel_upgrade_clears_rewire() {
        let records = vec![PermitRecord::new("PANEL UPGRADE", "2020")];
        let p = predict_as_of(1955, &records, 2026);
        assert!(!items(&p).contains(&"Full electrical rewire"));
        assert!(items(&p).contains(&"Galvanized pipe replacement"));
    }

    #[test]
    fn current_year_variant_flags_rewire() {
        assert!(items(&predict(1955, &[])).contains(&"Full electrical rewire"));
        let records = vec![PermitRecord::new("PANEL UPGRADE", "2020")];
        assert!(!items(&predict(1955, &records)).contains(&"Full electrical rewire"));
    }

    #[test]
    fn newer_house_only_gets_roof_check() {
        let p = predict_as_of(1995, &[], 2026);
        assert_eq!(items(&p), vec!["Roof replacement"]);
    }

    #[test]
    fn recent_roof_permit_clears_roof() {
        let records = vec![PermitRecord::new("REROOF 3 SQUARES", "2012-04-01")];
        let p = predict_as_of(1995, &records, 2026);
        assert!(p.is_empty());
    }

    #[test]
    fn old_roof_permit_does_not_count() {
        let records = vec![PermitRecord::new("REROOF", "1999-04-01")];
        let p = predict_as_of(1995, &records, 2026);
        assert_eq!(items(&p), vec!["Roof replacement"]);
    }

    #[test]
    fn undated_roof_permit_is_skipped_not_fatal() {
        let records = vec![
            PermitRecord::new("REROOF", "n/a"),
            PermitRecord::new("REROOF", "2015"),
        ];
        let p = predict_as_of(1995, &records, 2026);
        assert!(p.is_empty());

        let undated_only = vec![PermitRecord::new("REROOF", "n/a")];
        assert_eq!(
            items(&predict_as_of(1995, &undated_only, 2026)),
            vec!["Roof replacement"]
        );
    }

    #[test]
    fn keyword_checks_span_all_records() {
        let records = vec![
            PermitRecord::new("REPIPE WITH COPPER", "1990"),
            PermitRecord::new("REPLACE SEWER LATERAL", "1991"),
            PermitRecord::new("REWIRE", "1992"),
        ];
        let p = predict_as_of(1920, &records, 2026);
        assert_eq!(items(&p), vec!["Roof replacement"]);
    }

    #[test]
    fn threshold_years_are_exclusive() {
        assert!(!items(&predict_as_of(1960, &[], 2026)).contains(&"Full electrical rewire"));
        assert!(!items(&predict_as_of(1975, &[], 2026)).contains(&"Galvanized pipe replacement"));
        assert!(!items(&predict_as_of(1980, &[], 2026)).contains(&"Sewer lateral replacement"));
        assert!(items(&predict_as_of(1979, &[], 2026)).contains(&"Sewer lateral replacement"));
    }
}
