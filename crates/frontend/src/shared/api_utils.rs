//! API utilities for frontend-backend communication
//!
//! Provides helpers for constructing API URLs.

/// Build a full API URL from a base, a path and optional query parameters
///
/// Parameters with `None` values are skipped; values are percent-encoded.
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::api_url;
/// let url = api_url("/api/v1", "/analytics/top-products", &[("limit", Some("10".to_string()))]);
/// assert_eq!(url, "/api/v1/analytics/top-products?limit=10");
/// ```
pub fn api_url(base: &str, path: &str, params: &[(&str, Option<String>)]) -> String {
    let mut url = format!("{}{}", base.trim_end_matches('/'), path);

    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| format!("{}={}", key, urlencoding::encode(v)))
        })
        .collect();

    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_without_params() {
        assert_eq!(api_url("/api/v1/", "/health", &[]), "/api/v1/health");
        assert_eq!(
            api_url("/api/v1", "/analytics/dashboard", &[("start_date", None)]),
            "/api/v1/analytics/dashboard"
        );
    }

    #[test]
    fn test_api_url_with_params() {
        let url = api_url(
            "http://localhost:8000/api/v1",
            "/analytics/sales-trends",
            &[
                ("period", Some("day".to_string())),
                ("start_date", Some("2024-01-01".to_string())),
                ("end_date", None),
            ],
        );
        assert_eq!(
            url,
            "http://localhost:8000/api/v1/analytics/sales-trends?period=day&start_date=2024-01-01"
        );
    }

    #[test]
    fn test_api_url_encodes_values() {
        let url = api_url("/api", "/x", &[("q", Some("a b&c".to_string()))]);
        assert_eq!(url, "/api/x?q=a%20b%26c");
    }
}
