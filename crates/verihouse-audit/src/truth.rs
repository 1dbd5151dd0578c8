//! Listing truth checker: marketing claims versus recent permits.

use verihouse_core::{Discrepancy, DiscrepancyStatus, PermitRecord, current_year};

use crate::rules::Term;

/// Window for a permit to corroborate a listing claim.
pub const CLAIM_WINDOW_YEARS: i32 = 10;

struct Claim {
    name: &'static str,
    triggers: &'static [Term],
    evidence: &'static [Term],
    status: DiscrepancyStatus,
    message: &'static str,
}

const CLAIMS: &[Claim] = &[
    Claim {
        name: "Remodeled Kitchen",
        triggers: &[
            Term::Sub("CHEF'S KITCHEN"),
            Term::Sub("CHEFS KITCHEN"),
            Term::Sub("GOURMET KITCHEN"),
            Term::Sub("NEW KITCHEN"),
            Term::Sub("REMODELED KITCHEN"),
            Term::Sub("RENOVATED KITCHEN"),
            Term::Sub("UPDATED KITCHEN"),
            Term::Sub("KITCHEN REMODEL"),
        ],
        evidence: &[Term::Sub("KITCHEN")],
        status: DiscrepancyStatus::Unverified,
        message: "Listing advertises a remodeled kitchen, but no kitchen permit was filed in the last 10 years.",
    },
    Claim {
        name: "Remodeled Bathroom",
        triggers: &[
            Term::Sub("NEW BATH"),
            Term::Sub("REMODELED BATH"),
            Term::Sub("RENOVATED BATH"),
            Term::Sub("UPDATED BATH"),
            Term::Sub("SPA BATH"),
            Term::Sub("SPA-LIKE BATH"),
            Term::Sub("BATH REMODEL"),
            Term::Sub("BATHROOM REMODEL"),
        ],
        evidence: &[Term::Sub("BATH"), Term::Sub("SHOWER")],
        status: DiscrepancyStatus::Unverified,
        message: "Listing advertises a remodeled bathroom, but no bath or shower permit was filed in the last 10 years.",
    },
    Claim {
        name: "New Roof",
        triggers: &[
            Term::Sub("NEW ROOF"),
            Term::Sub("ROOF REPLACED"),
            Term::Sub("REPLACED ROOF"),
            Term::Sub("ROOF REPLACEMENT"),
        ],
        evidence: &[Term::Sub("ROOF")],
        status: DiscrepancyStatus::Unverified,
        message: "Listing advertises a new roof, but no roof permit was filed in the last 10 years.",
    },
    Claim {
        name: "ADU / In-Law Unit",
        triggers: &[
            Term::Word("ADU"),
            Term::Sub("IN-LAW"),
            Term::Sub("IN LAW"),
            Term::Sub("INLAW"),
            Term::Sub("ACCESSORY DWELLING"),
            Term::Sub("SECOND UNIT"),
        ],
        evidence: &[
            Term::Word("ADU"),
            Term::Sub("DWELLING UNIT"),
            Term::Sub("SECONDARY"),
        ],
        status: DiscrepancyStatus::IllegalRisk,
        message: "Listing advertises a secondary unit, but no dwelling-unit permit was filed in the last 10 years. The unit may be unwarranted.",
    },
];

/// Check listing claims relative to the current calendar year.
pub fn check(listing_text: &str, records: &[PermitRecord]) -> Vec<Discrepancy> {
    check_as_of(listing_text, records, current_year())
}

/// Check listing claims relative to `as_of`.
///
/// A claim is triggered by any of its phrases in the listing and corroborated
/// by any recent permit whose description matches an evidence term.
pub fn check_as_of(listing_text: &str, records: &[PermitRecord], as_of: i32) -> Vec<Discrepancy> {
    let listing = listing_text.replace(['\u{2018}', '\u{2019}'], "'").to_uppercase();
    let recent: Vec<String> = records
        .iter()
        .filter(|r| r.is_within(CLAIM_WINDOW_YEARS, as_of))
        .map(PermitRecord::upper_description)
        .collect();

    CLAIMS
        .iter()
        .filter(|claim| claim.triggers.iter().any(|t| t.found_in(&listing)))
        .filter(|claim| {
            !recent
                .iter()
                .any(|desc| claim.evidence.iter().any(|e| e.found_in(desc)))
        })
        .map(|claim| Discrepancy {
            claim: claim.name.to_string(),
            status: claim.status,
            message: claim.message.to_string(),
        })
        .collect()
}
