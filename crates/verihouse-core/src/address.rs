//! Street name normalisation and street-number filtering.
//!
//! The permits dataset is searched by street-name prefix, which returns every
//! address sharing that prefix. Exact street-number matching happens locally
//! afterwards.
//!
//! # SF open-data conventions
//!
//! - The street type lives in its own column (`street_suffix` = "ST", "AV"),
//!   so "Mission St" must be searched as "MISSION".
//! - Most rows are upper case ("MISSION"), but some datasets store title case
//!   ("Mission"). Searches try upper case first, then title case.
//! - Street numbers are free text: "301", "301-305", "0301".

use crate::permit::PermitRecord;

/// Street-type tokens stripped from the end of a street name.
const STREET_SUFFIXES: &[&str] = &[
    "ST", "STREET", "AV", "AVE", "AVENUE", "BLVD", "BOULEVARD", "DR", "DRIVE", "RD", "ROAD",
    "TER", "TERRACE", "PL", "PLACE", "CT", "COURT", "LN", "LANE", "HWY", "HIGHWAY", "WY",
];

/// Normalise a user-typed street name into the dataset's upper-case form.
///
/// Input: free text like " mission  st. ", "Van Ness Avenue"
/// Output: "MISSION", "VAN NESS"
///
/// # Algorithm
///
/// 1. Trim, upper-case, and collapse runs of whitespace
/// 2. Drop trailing periods and commas from each token
/// 3. Remove one trailing street-type token, unless it is the only token
pub fn normalize_street_name(s: &str) -> String {
    let mut tokens: Vec<String> = s
        .split_whitespace()
        .map(|t| t.trim_end_matches(['.', ',']).to_uppercase())
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.len() > 1
        && let Some(last) = tokens.last()
        && STREET_SUFFIXES.contains(&last.as_str())
    {
        tokens.pop();
    }

    tokens.join(" ")
}

/// Title-case each whitespace-separated word: "VAN NESS" → "Van Ness".
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case variants to search, in order: upper case, then title case.
///
/// Duplicates are removed, so names without letters yield one candidate.
/// An empty name yields no candidates.
pub fn case_candidates(street_name: &str) -> Vec<String> {
    let upper = normalize_street_name(street_name);
    if upper.is_empty() {
        return Vec::new();
    }
    let title = title_case(&upper);
    if title == upper {
        vec![upper]
    } else {
        vec![upper, title]
    }
}

/// Keep only records whose street number equals `number`.
///
/// Policy: exact equality after trimming, ignoring ASCII case. Hyphenated
/// ranges ("301-305") and longer numbers ("1301") never match "301".
pub fn filter_by_street_number(records: Vec<PermitRecord>, number: &str) -> Vec<PermitRecord> {
    let wanted = number.trim();
    records
        .into_iter()
        .filter(|r| r.street_number.trim().eq_ignore_ascii_case(wanted))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(records: &[PermitRecord]) -> Vec<&str> {
        records.iter().map(|r| r.street_number.as_str()).collect()
    }

    #[test]
    fn strips_suffix_and_uppercases() {
        assert_eq!(normalize_street_name("Mission St"), "MISSION");
        assert_eq!(normalize_street_name("  mission   st.  "), "MISSION");
        assert_eq!(normalize_street_name("Van Ness Avenue"), "VAN NESS");
        assert_eq!(normalize_street_name("Mission"), "MISSION");
    }

    #[test]
    fn lone_suffix_word_is_kept() {
        // "Terrace" alone is a name, not a suffix.
        assert_eq!(normalize_street_name("Terrace"), "TERRACE");
    }

    #[test]
    fn only_one_suffix_removed() {
        assert_eq!(normalize_street_name("Park Place Ct"), "PARK PLACE");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize_street_name("   "), "");
        assert!(case_candidates("").is_empty());
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("VAN NESS"), "Van Ness");
        assert_eq!(title_case("mission"), "Mission");
    }

    #[test]
    fn candidates_upper_then_title() {
        assert_eq!(case_candidates("mission st"), vec!["MISSION", "Mission"]);
    }

    #[test]
    fn numeric_street_candidates() {
        assert_eq!(case_candidates("16TH"), vec!["16TH", "16th"]);
        assert_eq!(case_candidates("101"), vec!["101"]);
    }

    #[test]
    fn exact_number_policy() {
        let records = vec![
            PermitRecord::default().with_street_number("301"),
            PermitRecord::default().with_street_number("301-305"),
            PermitRecord::default().with_street_number("1301"),
        ];
        let kept = filter_by_street_number(records, "301");
        assert_eq!(numbers(&kept), vec!["301"]);
    }

    #[test]
    fn number_match_trims_whitespace() {
        let records = vec![
            PermitRecord::default().with_street_number(" 301 "),
            PermitRecord::default().with_street_number("3"),
        ];
        let kept = filter_by_street_number(records, "301 ");
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn letter_suffixed_numbers_ignore_case() {
        let records = vec![PermitRecord::default().with_street_number("301A")];
        assert_eq!(filter_by_street_number(records, "301a").len(), 1);
    }

    #[test]
    fn filter_empty_input() {
        assert!(filter_by_street_number(Vec::new(), "301").is_empty());
    }
}
