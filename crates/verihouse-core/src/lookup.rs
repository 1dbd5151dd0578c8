//! The audit request and the outcomes of the two upstream lookups.
//!
//! Lookups never fail with an error value: every failure is folded into an
//! outcome variant so callers can tell "no matches" apart from "upstream
//! failed".

use serde::{Deserialize, Serialize};

use crate::permit::{PermitRecord, PropertyDetails};

/// One user-triggered audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub street_number: String,
    pub street_name: String,
    /// Free-text listing copy for the truth checker.
    pub listing: Option<String>,
}

impl AuditRequest {
    pub fn new(street_number: impl Into<String>, street_name: impl Into<String>) -> Self {
        Self {
            street_number: street_number.into(),
            street_name: street_name.into(),
            listing: None,
        }
    }

    pub fn with_listing(mut self, listing: impl Into<String>) -> Self {
        self.listing = Some(listing.into());
        self
    }

    /// Single-line address as sent to the property-details API.
    pub fn one_line_address(&self) -> String {
        format!(
            "{} {}, San Francisco, CA",
            self.street_number.trim(),
            self.street_name.split_whitespace().collect::<Vec<_>>().join(" ")
        )
    }
}

/// Outcome of the permit search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermitLookup {
    /// At least one record came back (before street-number filtering).
    Found(Vec<PermitRecord>),
    /// The search succeeded and matched nothing.
    NoRecords,
    /// Non-2xx status or an error envelope instead of a record array.
    ServiceError { status: Option<u16>, payload: String },
    /// The request never completed.
    ConnectionError { detail: String },
}

impl PermitLookup {
    pub fn from_records(records: Vec<PermitRecord>) -> Self {
        if records.is_empty() {
            Self::NoRecords
        } else {
            Self::Found(records)
        }
    }
}

/// Outcome of the property-details lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyLookup {
    Found(PropertyDetails),
    NotFound,
    /// No API key was configured.
    Disabled,
    Failed { detail: String },
}
