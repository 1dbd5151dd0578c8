//! Street search across case variants.
//!
//! The dataset's casing of `street_name` is inconsistent, so a search tries
//! upper case first and falls back to title case only when that is empty.

use std::future::Future;

use tracing::info;
use verihouse_core::{PermitRecord, case_candidates};

use crate::FetchError;

/// Run `fetch` for each case candidate of `street_name` until one has rows.
///
/// An error from any candidate is returned at once; later candidates are not
/// tried.
pub async fn search_candidates<F, Fut>(
    street_name: &str,
    mut fetch: F,
) -> Result<Vec<PermitRecord>, FetchError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Vec<PermitRecord>, FetchError>>,
{
    for candidate in case_candidates(street_name) {
        let records = fetch(candidate.clone()).await?;
        if !records.is_empty() {
            return Ok(records);
        }
        info!(street = %candidate, "no permits for case variant");
    }
    Ok(Vec::new())
}
