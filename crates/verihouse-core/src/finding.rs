//! Audit output types: findings, score tiers, maintenance predictions, and
//! listing discrepancies.

use serde::{Deserialize, Serialize};

/// Risk category attached to a deduction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fire,
    Structure,
    Legal,
    Water,
    Health,
    Finance,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Structure => "structure",
            Self::Legal => "legal",
            Self::Water => "water",
            Self::Health => "health",
            Self::Finance => "finance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    /// A matched risk rule; carries a deduction.
    Risk,
    /// A verified improvement; no score effect.
    Asset,
    /// A listing claim without permit support.
    Discrepancy,
}

/// One matched rule against one permit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    /// Set for risk findings only.
    pub category: Option<Category>,
    /// Points subtracted from the score (0 for assets).
    pub deduction: u32,
    pub message: String,
    /// Year of the source record, or `N/A`.
    pub year_or_date: String,
}

/// Coarse classification derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Standard,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Step function: ≥90 platinum, ≥80 gold, ≥70 silver, else standard.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Platinum,
            80..=89 => Self::Gold,
            70..=79 => Self::Silver,
            _ => Self::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }
}

/// Score, tier, and ordered findings for one set of permits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Always within `0..=100`.
    pub score: u32,
    pub tier: Tier,
    pub findings: Vec<Finding>,
}

impl AuditResult {
    pub fn risks(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.kind == FindingKind::Risk)
    }

    pub fn assets(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| f.kind == FindingKind::Asset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Probability {
    High,
    Medium,
}

impl Probability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
        }
    }
}

/// A system likely to need work soon, with a rough cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub item: String,
    pub probability: Probability,
    pub estimated_cost_range: String,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscrepancyStatus {
    /// No recent permit backs the claim.
    Unverified,
    /// The claim implies a unit that may not be legally permitted.
    IllegalRisk,
}

impl DiscrepancyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "UNVERIFIED",
            Self::IllegalRisk => "ILLEGAL_RISK",
        }
    }
}

/// A listing claim without corroborating recent permits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub claim: String,
    pub status: DiscrepancyStatus,
    pub message: String,
}

impl Discrepancy {
    /// The discrepancy as a generic finding, for unified listings.
    pub fn to_finding(&self) -> Finding {
        Finding {
            kind: FindingKind::Discrepancy,
            category: None,
            deduction: 0,
            message: format!("{}: {}", self.claim, self.message),
            year_or_date: crate::permit::NO_DATE.to_string(),
        }
    }
}
