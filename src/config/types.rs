use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for UA-Census
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// URL of the listing page the crawl starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Maximum number of fetches in flight
    pub concurrency: u32,

    /// Capacity of the pending request queue
    #[serde(rename = "queue-capacity")]
    pub queue_capacity: usize,

    /// Capacity of the record channel between handlers and the collector
    #[serde(rename = "results-buffer")]
    pub results_buffer: usize,

    /// Wall-clock budget for the whole crawl (seconds)
    #[serde(rename = "deadline-secs")]
    pub deadline_secs: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl CrawlerConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            start_url: "http://www.useragentstring.com/pages/useragentstring.php".to_string(),
            concurrency: 1,
            queue_capacity: 1000,
            results_buffer: 10000,
            deadline_secs: 30,
            request_timeout_secs: 30,
        }
    }
}

/// CSS selectors and class names used to read the listing and detail pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Anchors of the listing page's navigation container
    #[serde(rename = "list-anchors")]
    pub list_anchors: String,

    /// Class marking an anchor as a category heading
    #[serde(rename = "heading-class")]
    pub heading_class: String,

    /// Class marking an anchor as a title entry linking to a detail page
    #[serde(rename = "entry-class")]
    pub entry_class: String,

    /// Entries of a detail page's user-agent list
    #[serde(rename = "user-agents")]
    pub user_agents: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            list_anchors: "div#unterMenu a".to_string(),
            heading_class: "unterMenuTitel".to_string(),
            entry_class: "unterMenuName".to_string(),
            user_agents: "#liste li a".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "UA-Census".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/ua-census".to_string(),
        }
    }
}
