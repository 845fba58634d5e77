//! Page handlers for the listing page and the per-category detail pages

use crate::config::SelectorConfig;
use crate::crawler::dom::{Dom, HtmlDom};
use crate::crawler::fetcher::FetchedPage;
use crate::crawler::request::{Callback, CrawlRequest, DetailContext, PendingLink};
use crate::crawler::scheduler::Dispatcher;
use crate::record::UserAgentRecord;
use crate::CensusError;
use tokio::sync::mpsc;
use url::Url;

/// Handlers turning fetched pages into follow-up requests and records
pub struct Spider {
    selectors: SelectorConfig,
    results: mpsc::Sender<UserAgentRecord>,
}

impl Spider {
    /// Creates a spider that emits records into `results`
    pub fn new(selectors: SelectorConfig, results: mpsc::Sender<UserAgentRecord>) -> Self {
        Self { selectors, results }
    }

    /// Routes a fetched page to the handler named by its request
    ///
    /// Parsing happens here, synchronously, so the parsed document never
    /// lives across an `.await`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(record))` - A detail page produced a record to emit
    /// * `Ok(None)` - The listing page was scanned and its links dispatched
    /// * `Err(CensusError)` - A selector could not be applied
    pub fn handle(
        &self,
        request: &CrawlRequest,
        page: &FetchedPage,
        dispatcher: &dyn Dispatcher,
    ) -> Result<Option<UserAgentRecord>, CensusError> {
        let dom = HtmlDom::parse(&page.body);

        match &request.callback {
            Callback::List => {
                self.parse_list(&dom, &page.url, dispatcher)?;
                Ok(None)
            }
            Callback::UserAgents(context) => {
                let record = self.parse_user_agents(&dom, context.clone())?;
                tracing::info!("{}", page.url);
                tracing::info!(
                    "type={:?} title={:?} user-agents={}",
                    record.category,
                    record.title,
                    record.user_agents.len()
                );
                Ok(Some(record))
            }
        }
    }

    /// Scans the listing page and dispatches one request per title entry
    ///
    /// Anchors are visited in document order. A heading anchor sets the
    /// current category (its trimmed text, lowercased); every entry anchor
    /// after it is dispatched under that category, with its own text as the
    /// title. Entries before any heading get an empty category. Anchors with
    /// neither class are ignored.
    ///
    /// # Returns
    ///
    /// The number of detail requests dispatched
    pub fn parse_list(
        &self,
        dom: &dyn Dom,
        page_url: &Url,
        dispatcher: &dyn Dispatcher,
    ) -> Result<usize, CensusError> {
        let anchors = dom.query(&self.selectors.list_anchors)?;

        let mut category = String::new();
        let mut dispatched = 0;

        for anchor in anchors {
            if anchor.has_class(&self.selectors.heading_class) {
                category = anchor.text.trim().to_lowercase();
            } else if anchor.has_class(&self.selectors.entry_class) {
                let link = PendingLink {
                    category: category.clone(),
                    title: anchor.text.trim().to_string(),
                    url: resolve_href(anchor.attr("href"), page_url),
                    referer: page_url.to_string(),
                };
                tracing::debug!(
                    "Dispatching {:?}/{:?} -> '{}'",
                    link.category,
                    link.title,
                    link.url
                );
                dispatcher.dispatch(link.into());
                dispatched += 1;
            }
        }

        tracing::info!(
            "Listing scan of {} complete: {} detail pages dispatched",
            page_url,
            dispatched
        );
        Ok(dispatched)
    }

    /// Reads the user-agent list of a detail page into a record
    ///
    /// Entry texts are trimmed and kept in document order; entries that are
    /// empty after trimming are skipped. No matches yield an empty list.
    pub fn parse_user_agents(
        &self,
        dom: &dyn Dom,
        context: DetailContext,
    ) -> Result<UserAgentRecord, CensusError> {
        let user_agents = dom
            .query(&self.selectors.user_agents)?
            .into_iter()
            .map(|entry| entry.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        Ok(UserAgentRecord::new(
            context.category,
            context.title,
            user_agents,
        ))
    }

    /// Hands a record to the collector, waiting for buffer space
    pub async fn emit(&self, record: UserAgentRecord) -> Result<(), CensusError> {
        self.results
            .send(record)
            .await
            .map_err(|rejected| CensusError::ResultsClosed {
                title: rejected.0.title,
            })
    }
}

/// Trims an href and resolves it against the listing page URL
///
/// A missing or blank href becomes an empty URL, which the fetcher rejects.
fn resolve_href(href: Option<&str>, base: &Url) -> String {
    let href = href.unwrap_or("").trim();
    if href.is_empty() {
        return String::new();
    }

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}
