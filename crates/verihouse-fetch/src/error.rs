use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("expected a JSON array of records, got: {body}")]
    UpstreamShape { body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
