//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Rejecting empty or malformed request URLs before any network I/O
//! - Sending the referer of follow-up requests
//! - Classifying failures into [`FetchError`] variants

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::crawler::request::CrawlRequest;
use crate::FetchError;
use reqwest::header::REFERER;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Page body
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Identification sent with every request
/// * `crawler` - Crawler settings (request timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches the page a request points at
///
/// | Condition | Result |
/// |-----------|--------|
/// | Empty or unparsable URL | `InvalidUrl`, no request sent |
/// | Non-HTTP(S) scheme | `InvalidUrl`, no request sent |
/// | Non-2xx status | `Status` |
/// | Transport or body failure | `Network` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `request` - The request to fetch
pub async fn fetch_page(client: &Client, request: &CrawlRequest) -> Result<FetchedPage, FetchError> {
    let url = parse_request_url(&request.url)?;

    let mut builder = client.get(url.clone());
    if let Some(referer) = request.referer.as_deref().filter(|r| !r.is_empty()) {
        builder = builder.header(REFERER, referer);
    }

    let response = builder.send().await.map_err(|source| FetchError::Network {
        url: request.url.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: request.url.clone(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|source| FetchError::Network {
        url: request.url.clone(),
        source,
    })?;

    Ok(FetchedPage {
        url: final_url,
        status_code: status.as_u16(),
        body,
    })
}

fn parse_request_url(raw: &str) -> Result<Url, FetchError> {
    if raw.is_empty() {
        return Err(FetchError::InvalidUrl {
            url: String::new(),
            reason: "empty URL".to_string(),
        });
    }

    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}
