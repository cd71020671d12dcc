//! Constants for talking to the analytics endpoint

/// User agent sent with every submission
pub const USER_AGENT: &str = concat!("survey-portal/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the submission endpoint URL
pub const ENDPOINT_ENV_VAR: &str = "SURVEY_SHEET_API_URL";

/// Request timeout when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection timeout, always shorter than the request timeout
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

pub mod headers {
    /// Content type for the JSON batch
    pub const CONTENT_TYPE_JSON: &str = "application/json";

    /// Correlation id echoed in logs on both sides
    pub const CORRELATION_ID: &str = "x-correlation-id";
}

/// Whether `url` is an absolute http(s) URL
pub fn is_valid_endpoint(url: &str) -> bool {
    match reqwest::Url::parse(url.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}
