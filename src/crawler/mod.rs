//! Crawler module for the user-agent listing site
//!
//! This module contains the two-stage scrape, including:
//! - HTTP fetching
//! - The listing-page and detail-page handlers
//! - Request scheduling with completion tracking
//! - Record collection and overall crawl coordination

mod collector;
mod coordinator;
pub mod dom;
mod fetcher;
mod request;
mod scheduler;
mod spider;

pub use collector::Collector;
pub use coordinator::{run_crawl, Coordinator};
pub use dom::{Dom, Element, HtmlDom};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use request::{Callback, CrawlRequest, DetailContext, PendingLink};
pub use scheduler::{Dispatch, Dispatcher, PendingWork, Scheduler, WorkGuard};
pub use spider::Spider;
