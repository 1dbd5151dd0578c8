//! Audit layer: keyword risk scanning, maintenance prediction, and listing
//! truth checks over already-fetched permit records.

pub mod predictor;
pub mod report;
pub mod rules;
pub mod scanner;
pub mod truth;

pub use predictor::{predict, predict_as_of};
pub use report::{AuditReport, LookupStatus, PredictorStatus, build_report};
pub use scanner::analyze;
pub use truth::{check, check_as_of};
