//! HTTP clients for the permits dataset and the property-details API.

use std::time::Duration;

use tracing::{info, warn};
use verihouse_core::{PermitRecord, PropertyDetails};

use crate::payload::{parse_permits, parse_property};
use crate::query::{recent_query, street_prefix_query};
use crate::search::search_candidates;
use crate::FetchError;

/// Client for the SF building-permits Socrata endpoint.
pub struct PermitClient {
    client: reqwest::Client,
    base_url: String,
}

impl PermitClient {
    /// Create a client for the given dataset URL.
    ///
    /// `base_url` should be the full resource URL, e.g.
    /// `https://data.sfgov.org/resource/i98e-djp9.json`.
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search permits by street name, trying each case candidate in turn.
    ///
    /// Stops at the first candidate that returns rows. Errors are returned
    /// immediately; nothing is retried.
    pub async fn search_street(&self, street_name: &str) -> Result<Vec<PermitRecord>, FetchError> {
        search_candidates(street_name, move |candidate| async move {
            self.fetch_street_prefix(&candidate).await
        })
        .await
    }

    /// One prefix query for an already-normalised street name.
    pub async fn fetch_street_prefix(
        &self,
        street_name: &str,
    ) -> Result<Vec<PermitRecord>, FetchError> {
        info!(url = %self.base_url, street = %street_name, "querying permits");
        let records = self.get(&street_prefix_query(street_name)).await?;
        info!(count = records.len(), "fetched permits");
        Ok(records)
    }

    /// The newest `limit` permits citywide.
    pub async fn recent(&self, limit: u32) -> Result<Vec<PermitRecord>, FetchError> {
        info!(url = %self.base_url, limit, "fetching recent permits");
        self.get(&recent_query(limit)).await
    }

    async fn get(&self, params: &[(&'static str, String)]) -> Result<Vec<PermitRecord>, FetchError> {
        let resp = self.client.get(&self.base_url).query(params).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let result = parse_permits(status, &body);
        if let Err(e) = &result {
            warn!(status, error = %e, "permit query failed");
        }
        result
    }
}

/// Client for the RentCast property-details API.
pub struct PropertyClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PropertyClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Look up a property by single-line address.
    ///
    /// Returns `Ok(None)` when the API has no record for the address.
    pub async fn lookup(&self, address: &str) -> Result<Option<PropertyDetails>, FetchError> {
        info!(url = %self.base_url, address = %address, "looking up property details");
        let resp = self
            .client
            .get(&self.base_url)
            .query(&[("address", address)])
            .header("X-Api-Key", &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let details = parse_property(status, &body)?;
        info!(
            found = details.is_some(),
            year_built = ?details.as_ref().and_then(|d| d.year_built),
            "property lookup complete"
        );
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permit_client_trims_trailing_slash() {
        let client = PermitClient::new(
            "https://data.sfgov.org/resource/i98e-djp9.json/".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            client.base_url,
            "https://data.sfgov.org/resource/i98e-djp9.json"
        );
    }

    #[test]
    fn property_client_keeps_key() {
        let client = PropertyClient::new(
            "https://api.rentcast.io/v1/properties/".into(),
            "secret".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.rentcast.io/v1/properties");
        assert_eq!(client.api_key, "secret");
    }
}
