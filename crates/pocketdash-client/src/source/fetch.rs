use chrono::Utc;
use tracing::info;

use crate::{ClientError, ClientResult};

/// Anything that can hand the pipeline one raw CSV payload.
pub trait CsvSource {
    fn describe(&self) -> String;

    fn load(&self) -> ClientResult<String>;
}

/// Published spreadsheet endpoint read with one cache-busting GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    stamp: Option<i64>,
}

impl HttpSource {
    /// `stamp` is appended as the cache-busting parameter; callers normally pass
    /// the current time in milliseconds.
    pub fn new(url: &str, stamp: i64) -> Self {
        Self {
            url: url.to_string(),
            stamp: Some(stamp),
        }
    }

    /// Stamps every request with the wall clock at load time instead of a
    /// fixed value. Used by long-running refresh loops.
    pub fn stamped_per_request(mut self) -> Self {
        self.stamp = None;
        self
    }

    pub fn request_url(&self) -> String {
        let stamp = self.stamp.unwrap_or_else(|| Utc::now().timestamp_millis());
        cache_busted_url(&self.url, stamp)
    }
}

impl CsvSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn load(&self) -> ClientResult<String> {
        fetch_text(&self.request_url())
    }
}

/// Single attempt, no retry. Any non-2xx status is a failure carrying the code.
pub fn fetch_text(url: &str) -> ClientResult<String> {
    info!(url, "fetching csv");
    let response = reqwest::blocking::get(url)
        .map_err(|error| ClientError::network_transport(url, &error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        info!(url, status = status.as_u16(), "csv fetch failed");
        return Err(ClientError::network_status(url, status.as_u16()));
    }

    let body = response
        .text()
        .map_err(|error| ClientError::network_transport(url, &error.to_string()))?;
    info!(url, bytes = body.len(), "csv fetched");
    Ok(body)
}

pub fn cache_busted_url(url: &str, stamp: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}_cb={stamp}")
}

#[cfg(test)]
mod tests {
    use super::{HttpSource, cache_busted_url};

    #[test]
    fn appends_query_parameter_to_bare_url() {
        assert_eq!(
            cache_busted_url("https://docs.example/sheet.csv", 42),
            "https://docs.example/sheet.csv?_cb=42"
        );
    }

    #[test]
    fn extends_existing_query_string() {
        assert_eq!(
            cache_busted_url("https://docs.example/pub?output=csv", 7),
            "https://docs.example/pub?output=csv&_cb=7"
        );
    }

    #[test]
    fn different_stamps_produce_different_request_urls() {
        let first = HttpSource::new("https://docs.example/pub?output=csv", 1);
        let second = HttpSource::new("https://docs.example/pub?output=csv", 2);
        assert_ne!(first.request_url(), second.request_url());
    }

    #[test]
    fn per_request_stamps_keep_the_base_url() {
        let source = HttpSource::new("https://docs.example/sheet.csv", 9).stamped_per_request();
        let url = source.request_url();
        assert!(url.starts_with("https://docs.example/sheet.csv?_cb="));
        assert!(!url.ends_with("_cb=9"));
    }
}
