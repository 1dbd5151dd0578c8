//! Static keyword tables for the risk and asset scanner.
//!
//! All matching is done against upper-cased text. Most terms are plain
//! substrings; a few short abbreviations must stand alone as words, since a
//! substring "NOV" also matches "RENOVATION".

use verihouse_core::Category;

/// A single keyword test.
#[derive(Debug, Clone, Copy)]
pub enum Term {
    /// Matches anywhere in the text.
    Sub(&'static str),
    /// Matches only when not flanked by letters or digits.
    Word(&'static str),
    /// Substring match, suppressed when any `unless` term is also present.
    Guarded {
        text: &'static str,
        unless: &'static [&'static str],
    },
}

impl Term {
    pub fn found_in(&self, upper: &str) -> bool {
        match *self {
            Self::Sub(t) => upper.contains(t),
            Self::Word(t) => contains_word(upper, t),
            Self::Guarded { text, unless } => {
                upper.contains(text) && !unless.iter().any(|u| upper.contains(u))
            }
        }
    }
}

/// How a rule's terms combine.
#[derive(Debug, Clone, Copy)]
pub enum Pattern {
    /// Any one term.
    Any(&'static [Term]),
    /// At least one term from every group.
    AllOf(&'static [&'static [Term]]),
}

impl Pattern {
    pub fn matches(&self, upper: &str) -> bool {
        match *self {
            Self::Any(terms) => terms.iter().any(|t| t.found_in(upper)),
            Self::AllOf(groups) => groups
                .iter()
                .all(|group| group.iter().any(|t| t.found_in(upper))),
        }
    }
}

/// A deduction applied when a permit description matches.
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub id: &'static str,
    pub pattern: Pattern,
    pub deduction: u32,
    pub category: Category,
    /// `{year}` is replaced with the record's year.
    pub message: &'static str,
}

/// A verified improvement; reported but never scored.
#[derive(Debug, Clone, Copy)]
pub struct AssetRule {
    pub id: &'static str,
    pub pattern: Pattern,
    pub label: &'static str,
}

/// Benign permit text that mentions burning without any fire damage.
const BURNING_SAFE: &[&str] = &["STOVE", "FIREPLACE INSERT"];

pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        id: "knob_and_tube",
        pattern: Pattern::Any(&[Term::Sub("KNOB"), Term::Sub("TUBE")]),
        deduction: 25,
        category: Category::Fire,
        message: "Knob & tube wiring referenced in {year} permit",
    },
    RiskRule {
        id: "aluminum_wiring",
        pattern: Pattern::Any(&[Term::Sub("ALUMINUM WIRING")]),
        deduction: 15,
        category: Category::Fire,
        message: "Aluminum branch wiring referenced in {year} permit",
    },
    RiskRule {
        id: "unpermitted_work",
        pattern: Pattern::Any(&[Term::Sub("UNPERMITTED"), Term::Sub("ILLEGAL WIRING")]),
        deduction: 20,
        category: Category::Legal,
        message: "Unpermitted or illegal work legalized in {year}",
    },
    RiskRule {
        id: "foundation",
        pattern: Pattern::Any(&[
            Term::Sub("UNDERPIN"),
            Term::Sub("SHORING"),
            Term::Sub("FOUNDATION REPAIR"),
            Term::Sub("SETTLEMENT"),
        ]),
        deduction: 30,
        category: Category::Structure,
        message: "Foundation repair or settlement work in {year}",
    },
    RiskRule {
        id: "framing_damage",
        pattern: Pattern::Any(&[
            Term::Sub("SISTERING"),
            Term::Sub("JOIST REPAIR"),
            Term::Sub("DRY ROT"),
            Term::Sub("TERMITE"),
        ]),
        deduction: 15,
        category: Category::Structure,
        message: "Framing damage (dry rot, termite, joist repair) in {year}",
    },
    RiskRule {
        id: "fire_damage",
        pattern: Pattern::Any(&[
            Term::Sub("FIRE DAMAGE"),
            Term::Sub("CHARRED"),
            Term::Sub("SCORCH"),
            Term::Guarded {
                text: "BURNING",
                unless: BURNING_SAFE,
            },
        ]),
        deduction: 30,
        category: Category::Fire,
        message: "Fire damage repair in {year}",
    },
    RiskRule {
        id: "water_damage",
        pattern: Pattern::Any(&[
            Term::Sub("WATER DAMAGE"),
            Term::Sub("LEAK"),
            Term::Sub("MOLD"),
            Term::Sub("FUNGAL"),
        ]),
        deduction: 20,
        category: Category::Water,
        message: "Water intrusion or mold in {year}",
    },
    RiskRule {
        id: "hazardous_materials",
        pattern: Pattern::Any(&[
            Term::Sub("REMEDIATION"),
            Term::Sub("ABATEMENT"),
            Term::Sub("ASBESTOS"),
            Term::Sub("LEAD PAINT"),
        ]),
        deduction: 10,
        category: Category::Health,
        message: "Hazardous material remediation in {year}",
    },
    RiskRule {
        id: "notice_of_violation",
        pattern: Pattern::Any(&[
            Term::Word("NOV"),
            Term::Sub("NOTICE OF VIOLATION"),
            Term::Sub("ORDER OF ABATEMENT"),
        ]),
        deduction: 25,
        category: Category::Legal,
        message: "Notice of violation on record ({year})",
    },
    RiskRule {
        id: "solar_lease",
        pattern: Pattern::AllOf(&[
            &[Term::Sub("SOLAR")],
            &[Term::Sub("LEASE"), Term::Word("PPA")],
        ]),
        deduction: 15,
        category: Category::Finance,
        message: "Leased solar / PPA installed in {year}; contract transfers with sale",
    },
];

pub const ASSET_RULES: &[AssetRule] = &[
    AssetRule {
        id: "roof",
        pattern: Pattern::Any(&[Term::Sub("REROOF"), Term::Sub("NEW ROOF")]),
        label: "New roof",
    },
    AssetRule {
        id: "seismic",
        pattern: Pattern::Any(&[Term::Sub("SEISMIC"), Term::Sub("RETROFIT"), Term::Sub("BOLT")]),
        label: "Seismic retrofit",
    },
    AssetRule {
        id: "plumbing",
        pattern: Pattern::Any(&[Term::Sub("COPPER"), Term::Sub("REPIPE")]),
        label: "Copper repipe",
    },
    AssetRule {
        id: "electrical",
        pattern: Pattern::Any(&[
            Term::Sub("100 AMP"),
            Term::Sub("200 AMP"),
            Term::Sub("PANEL UPGRADE"),
        ]),
        label: "Electrical panel upgrade",
    },
];

/// True when `word` occurs in `text` with no letter or digit on either side.
pub fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    text.match_indices(word).any(|(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + word.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str) -> &'static RiskRule {
        RISK_RULES.iter().find(|r| r.id == id).unwrap()
    }

    #[test]
    fn word_boundaries() {
        assert!(contains_word("ISSUED NOV 2019", "NOV"));
        assert!(contains_word("NOV", "NOV"));
        assert!(contains_word("PER NOV#1234", "NOV"));
        assert!(!contains_word("KITCHEN RENOVATION", "NOV"));
        assert!(!contains_word("NOVEMBER", "NOV"));
        assert!(!contains_word("ANYTHING", ""));
    }

    #[test]
    fn renovation_is_not_a_violation() {
        assert!(!rule("notice_of_violation").pattern.matches("KITCHEN RENOVATION"));
        assert!(rule("notice_of_violation").pattern.matches("COMPLY WITH NOV 201912345"));
    }

    #[test]
    fn burning_guard() {
        let fire = rule("fire_damage");
        assert!(!fire.pattern.matches("INSTALL WOOD BURNING STOVE"));
        assert!(!fire.pattern.matches("GAS BURNING FIREPLACE INSERT"));
        assert!(fire.pattern.matches("REPAIR AFTER BURNING OF REAR UNIT"));
        // The guard covers BURNING only; explicit fire damage still matches.
        assert!(fire.pattern.matches("FIRE DAMAGE REPAIR, REPLACE STOVE"));
    }

    #[test]
    fn solar_needs_both_groups() {
        let solar = rule("solar_lease");
        assert!(solar.pattern.matches("SOLAR PANELS UNDER 20 YR LEASE"));
        assert!(solar.pattern.matches("ROOFTOP SOLAR, PPA WITH VENDOR"));
        assert!(!solar.pattern.matches("ROOFTOP SOLAR PV SYSTEM"));
        assert!(!solar.pattern.matches("RELEASE OF LEASE"));
    }

    #[test]
    fn table_shape() {
        assert_eq!(RISK_RULES.len(), 10);
        assert_eq!(ASSET_RULES.len(), 4);
        assert_eq!(rule("knob_and_tube").deduction, 25);
        assert_eq!(rule("foundation").category, Category::Structure);
        assert!(RISK_RULES.iter().all(|r| r.message.contains("{year}")));
    }
}
