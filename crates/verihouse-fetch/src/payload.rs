//! Response classification, kept free of I/O so it can be tested directly.
//!
//! Socrata answers errors with a JSON object (`{"error": true, "message": ...}`)
//! and sometimes with a 200 status, so shape is checked as well as status.

use serde_json::Value;
use tracing::warn;
use verihouse_core::{PermitLookup, PermitRecord, PropertyDetails, PropertyLookup};

use crate::FetchError;

/// Parse a permits response body.
///
/// Non-2xx statuses and non-array bodies are errors. Array elements that are
/// not objects are skipped.
pub fn parse_permits(status: u16, body: &str) -> Result<Vec<PermitRecord>, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Server {
            status,
            body: body.to_string(),
        });
    }

    let rows = match serde_json::from_str::<Value>(body)? {
        Value::Array(rows) => rows,
        _ => {
            return Err(FetchError::UpstreamShape {
                body: body.to_string(),
            });
        }
    };

    let total = rows.len();
    let records: Vec<PermitRecord> = rows
        .into_iter()
        .filter_map(|row| serde_json::from_value(row).ok())
        .collect();
    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            "skipped malformed permit rows"
        );
    }
    Ok(records)
}

/// Parse a property-details response body.
///
/// Non-2xx statuses and empty arrays mean "not found"; otherwise the first
/// element is the property. Individual fields are parsed leniently, so only a
/// first element that is not an object fails here.
pub fn parse_property(status: u16, body: &str) -> Result<Option<PropertyDetails>, FetchError> {
    if !(200..300).contains(&status) {
        warn!(status, body = %body, "property lookup returned non-success status");
        return Ok(None);
    }

    match serde_json::from_str::<Value>(body)? {
        Value::Array(rows) => match rows.into_iter().next() {
            Some(first) => Ok(Some(serde_json::from_value(first)?)),
            None => Ok(None),
        },
        _ => Err(FetchError::UpstreamShape {
            body: body.to_string(),
        }),
    }
}

/// Fold a permit fetch result into an explicit outcome.
pub fn into_permit_lookup(result: Result<Vec<PermitRecord>, FetchError>) -> PermitLookup {
    match result {
        Ok(records) => PermitLookup::from_records(records),
        Err(FetchError::Server { status, body }) => PermitLookup::ServiceError {
            status: Some(status),
            payload: body,
        },
        Err(FetchError::UpstreamShape { body }) => PermitLookup::ServiceError {
            status: None,
            payload: body,
        },
        Err(FetchError::Json(e)) => PermitLookup::ServiceError {
            status: None,
            payload: e.to_string(),
        },
        #[cfg(feature = "http")]
        Err(FetchError::Http(e)) => PermitLookup::ConnectionError {
            detail: e.to_string(),
        },
    }
}

/// Fold a property fetch result into an explicit outcome.
pub fn into_property_lookup(
    result: Result<Option<PropertyDetails>, FetchError>,
) -> PropertyLookup {
    match result {
        Ok(Some(details)) => PropertyLookup::Found(details),
        Ok(None) => PropertyLookup::NotFound,
        Err(e) => PropertyLookup::Failed {
            detail: e.to_string(),
        },
    }
}
