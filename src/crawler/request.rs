//! Crawl requests and the metadata they carry to their handler

/// Request-scoped metadata attached to a detail-page fetch
///
/// Set by the listing handler when it dispatches the request and handed to
/// the detail handler with the response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailContext {
    /// Lowercased text of the nearest preceding category heading
    pub category: String,

    /// Visible text of the title-entry anchor
    pub title: String,
}

/// Which handler processes a response, with that handler's payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// The top-level listing page
    List,

    /// A per-category detail page
    UserAgents(DetailContext),
}

impl Callback {
    pub fn name(&self) -> &'static str {
        match self {
            Callback::List => "list",
            Callback::UserAgents(_) => "user-agents",
        }
    }
}

/// A unit of work for the scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Absolute URL to fetch; may be empty, in which case the fetch fails
    pub url: String,

    /// Page that linked here, sent as the `Referer` header
    pub referer: Option<String>,

    pub callback: Callback,
}

impl CrawlRequest {
    pub fn list(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referer: None,
            callback: Callback::List,
        }
    }
}

/// A title-entry link found on the listing page, about to be dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
    pub category: String,
    pub title: String,
    pub url: String,
    pub referer: String,
}

impl From<PendingLink> for CrawlRequest {
    fn from(link: PendingLink) -> Self {
        CrawlRequest {
            url: link.url,
            referer: Some(link.referer),
            callback: Callback::UserAgents(DetailContext {
                category: link.category,
                title: link.title,
            }),
        }
    }
}
