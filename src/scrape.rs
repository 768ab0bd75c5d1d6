// 🕸️ Scrape Proxy Contract - request/response shapes + outcome classification
//
// The proxy itself (HTTP call to the scraping provider) lives outside this
// crate. What lives here is the contract and the pure rules for turning an
// upstream answer into a response:
//   - missing credential  → ProxyError (HTTP 500)
//   - missing URL         → ProxyError (HTTP 400)
//   - 403 / captcha       → success=false, blocked=true   (HTTP 200)
//   - < 100 chars content → success=false                 (HTTP 200)
// Blocked and thin pages are soft failures so the caller can branch on content.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Fixed upstream timeout; there is no retry
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Pages with less markdown than this are treated as empty
pub const MIN_CONTENT_LENGTH: usize = 100;

const CAPTCHA_MARKER: &str = "captcha";

// ============================================================================
// REQUEST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScrapeOptions {
    pub formats: Vec<String>,
    pub only_main_content: bool,

    /// Milliseconds to wait for client-side rendering
    pub wait_for: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        ScrapeOptions {
            formats: vec!["markdown".to_string()],
            only_main_content: true,
            wait_for: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub options: ScrapeOptions,
}

impl ScrapeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        ScrapeRequest {
            url: Some(url.into()),
            options: ScrapeOptions::default(),
        }
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeData {
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ScrapeData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
}

impl ScrapeResponse {
    pub fn ok(markdown: String) -> Self {
        ScrapeResponse {
            success: true,
            data: Some(ScrapeData { markdown }),
            error: None,
            blocked: None,
        }
    }

    pub fn blocked(message: &str) -> Self {
        ScrapeResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            blocked: Some(true),
        }
    }

    pub fn failed(message: String) -> Self {
        ScrapeResponse {
            success: false,
            data: None,
            error: Some(message),
            blocked: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.unwrap_or(false)
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProxyError {
    #[error("scraping API key is not configured")]
    MissingCredential,

    #[error("url is required")]
    MissingUrl,
}

impl ProxyError {
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::MissingCredential => 500,
            ProxyError::MissingUrl => 400,
        }
    }
}

/// Check configuration and input before any upstream call is made.
/// Returns the URL to scrape.
pub fn validate_proxy_request<'a>(
    api_key: Option<&str>,
    request: &'a ScrapeRequest,
) -> Result<&'a str, ProxyError> {
    match api_key {
        Some(key) if !key.trim().is_empty() => {}
        _ => return Err(ProxyError::MissingCredential),
    }

    match request.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(ProxyError::MissingUrl),
    }
}

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Turn an upstream status + markdown body into the proxy response
pub fn classify_upstream(status: u16, markdown: Option<&str>) -> ScrapeResponse {
    if status == 403 {
        tracing::warn!(status, "scrape blocked by target site");
        return ScrapeResponse::blocked("Access to this page was blocked by the website");
    }

    let markdown = markdown.unwrap_or("");

    if markdown.to_lowercase().contains(CAPTCHA_MARKER) {
        tracing::warn!("scrape hit a captcha page");
        return ScrapeResponse::blocked("The website requires a captcha; open the listing manually");
    }

    if !(200..300).contains(&status) {
        return ScrapeResponse::failed(format!("Upstream returned HTTP {}", status));
    }

    if markdown.chars().count() < MIN_CONTENT_LENGTH {
        return ScrapeResponse::failed("Insufficient content retrieved from the page".to_string());
    }

    ScrapeResponse::ok(markdown.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_markdown() -> String {
        "# Apartamento T2 em Coimbra\n".repeat(10)
    }

    #[test]
    fn test_request_wire_format() {
        let json = r#"{"url":"https://example.pt/x","options":{"formats":["markdown"],"onlyMainContent":true,"waitFor":2000}}"#;
        let request: ScrapeRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.url.as_deref(), Some("https://example.pt/x"));
        assert!(request.options.only_main_content);
        assert_eq!(request.options.wait_for, 2000);
    }

    #[test]
    fn test_partial_options_use_defaults() {
        let json = r#"{"url":"https://example.pt/x","options":{"formats":["markdown"]}}"#;
        let request: ScrapeRequest = serde_json::from_str(json).unwrap();

        assert!(request.options.only_main_content);
        assert_eq!(request.options.wait_for, 3000);

        let request: ScrapeRequest = serde_json::from_str(r#"{"url":"https://example.pt/x"}"#).unwrap();
        assert_eq!(request.options, ScrapeOptions::default());
    }

    #[test]
    fn test_validate_request() {
        let request = ScrapeRequest::new("https://example.pt");
        assert_eq!(validate_proxy_request(Some("key"), &request), Ok("https://example.pt"));

        let err = validate_proxy_request(None, &request).unwrap_err();
        assert_eq!(err, ProxyError::MissingCredential);
        assert_eq!(err.status_code(), 500);

        let empty = ScrapeRequest { url: Some("  ".to_string()), options: ScrapeOptions::default() };
        let err = validate_proxy_request(Some("key"), &empty).unwrap_err();
        assert_eq!(err, ProxyError::MissingUrl);
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_forbidden_is_blocked() {
        let response = classify_upstream(403, None);
        assert!(!response.success);
        assert!(response.is_blocked());
    }

    #[test]
    fn test_captcha_is_blocked() {
        let body = format!("{} Please complete the CAPTCHA", long_markdown());
        let response = classify_upstream(200, Some(&body));
        assert!(response.is_blocked());
    }

    #[test]
    fn test_short_content_is_soft_failure() {
        let response = classify_upstream(200, Some("too short"));
        assert!(!response.success);
        assert!(!response.is_blocked());
        assert!(response.error.is_some());
    }

    #[test]
    fn test_upstream_error_is_soft_failure() {
        let body = long_markdown();
        let response = classify_upstream(500, Some(&body));

        assert!(!response.success);
        assert!(!response.is_blocked());
        assert!(response.data.is_none());
        assert!(response.error.unwrap().contains("500"));
    }

    #[test]
    fn test_success() {
        let body = long_markdown();
        let response = classify_upstream(200, Some(&body));
        assert!(response.success);
        assert_eq!(response.data.unwrap().markdown, body);

        let json = serde_json::to_string(&classify_upstream(200, Some(&long_markdown()))).unwrap();
        assert!(!json.contains("blocked"));
    }
}
