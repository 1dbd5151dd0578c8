pub mod address;
pub mod finding;
pub mod lookup;
pub mod permit;

pub use address::{case_candidates, filter_by_street_number, normalize_street_name, title_case};
pub use finding::{
    AuditResult, Category, Discrepancy, DiscrepancyStatus, Finding, FindingKind, Prediction,
    Probability, Tier,
};
pub use lookup::{AuditRequest, PermitLookup, PropertyLookup};
pub use permit::{PermitRecord, PropertyDetails, current_year};
