//! Fetch layer: Socrata permit queries and RentCast property lookups.

mod error;
pub use error::FetchError;

pub mod payload;
pub mod query;
pub mod search;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{PermitClient, PropertyClient};

pub use payload::{into_permit_lookup, into_property_lookup};
pub use search::search_candidates;
