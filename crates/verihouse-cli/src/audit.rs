//! Audit pipeline: concurrent lookups → filter → scan → predict → check.

use std::time::Instant;

use anyhow::Context;
use verihouse_audit::{AuditReport, build_report};
use verihouse_core::{AuditRequest, PermitLookup, PropertyLookup, current_year};
use verihouse_fetch::{PermitClient, PropertyClient, into_permit_lookup, into_property_lookup};

use crate::Config;

/// Run one audit end to end.
///
/// The permit search and the property lookup are independent, so they run
/// concurrently; a failure in either is folded into the report rather than
/// returned. Only client construction can fail here.
pub async fn run_audit(config: &Config, request: &AuditRequest) -> anyhow::Result<AuditReport> {
    let start = Instant::now();

    let permits =
        PermitClient::new(config.permits_url.clone(), config.timeout()).context("building permit client")?;
    let property = match config.api_key() {
        Some(key) => Some(
            PropertyClient::new(config.property_url.clone(), key.to_string(), config.timeout())
                .context("building property client")?,
        ),
        None => {
            tracing::warn!("no RentCast API key configured; maintenance prediction disabled");
            None
        }
    };

    let address = request.one_line_address();
    let (permit_lookup, property_lookup) = tokio::join!(
        async { into_permit_lookup(permits.search_street(&request.street_name).await) },
        async {
            match &property {
                Some(client) => into_property_lookup(client.lookup(&address).await),
                None => PropertyLookup::Disabled,
            }
        },
    );

    let report = build_report(request, permit_lookup, property_lookup, current_year());
    tracing::info!(
        address = %report.address,
        score = ?report.result.as_ref().map(|r| r.score),
        predictions = report.predictions.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "audit complete"
    );
    Ok(report)
}

/// Fetch the newest permits citywide.
pub async fn run_recent(config: &Config, limit: u32) -> anyhow::Result<PermitLookup> {
    let permits =
        PermitClient::new(config.permits_url.clone(), config.timeout()).context("building permit client")?;
    Ok(into_permit_lookup(permits.recent(limit).await))
}
