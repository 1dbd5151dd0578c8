//! Socrata (SoQL) query parameters for the SF building-permits dataset.

/// SF building permits, current dataset.
pub const DEFAULT_PERMITS_URL: &str = "https://data.sfgov.org/resource/i98e-djp9.json";

/// RentCast property records.
pub const DEFAULT_PROPERTY_URL: &str = "https://api.rentcast.io/v1/properties";

/// Upper bound on rows per request.
pub const MAX_ROWS: u32 = 2000;

const NEWEST_FIRST: &str = "permit_creation_date DESC";

/// Prefix search on `street_name`, newest first, capped at [`MAX_ROWS`].
///
/// `street_name` is used verbatim (callers pass an already-normalised case
/// candidate); quotes are escaped and the `LIKE` wildcards `%` and `_` are
/// stripped.
pub fn street_prefix_query(street_name: &str) -> Vec<(&'static str, String)> {
    vec![
        (
            "$where",
            format!("street_name like '{}%'", escape_literal(street_name)),
        ),
        ("$limit", MAX_ROWS.to_string()),
        ("$order", NEWEST_FIRST.to_string()),
    ]
}

/// The newest `limit` permits citywide, with no filter.
pub fn recent_query(limit: u32) -> Vec<(&'static str, String)> {
    vec![
        ("$limit", limit.clamp(1, MAX_ROWS).to_string()),
        ("$order", NEWEST_FIRST.to_string()),
    ]
}

/// Escape a value for use inside a single-quoted SoQL string literal.
fn escape_literal(s: &str) -> String {
    s.replace(['%', '_'], "").replace('\'', "''")
}
