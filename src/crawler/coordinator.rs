//! Crawler coordinator - main crawl orchestration logic
//!
//! This module wires the scheduler, the spider and the collector together:
//! - Scheduling the listing page
//! - Running the scheduler and draining its error stream
//! - Collecting records until all dispatched work is done or the deadline hits
//! - Writing the record file

use crate::config::Config;
use crate::crawler::collector::Collector;
use crate::crawler::fetcher::build_http_client;
use crate::crawler::request::CrawlRequest;
use crate::crawler::scheduler::{Dispatcher, Scheduler};
use crate::crawler::spider::Spider;
use crate::output::write_records;
use crate::record::UserAgentRecord;
use crate::CensusError;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CensusError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, CensusError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Ok(Self { config, client })
    }

    /// Runs the crawl and returns the collected records
    ///
    /// Fetch errors are logged and skipped. When the deadline expires,
    /// queued and in-flight requests are abandoned and the records collected
    /// so far are returned.
    pub async fn run(&self) -> Result<Vec<UserAgentRecord>, CensusError> {
        let crawler = &self.config.crawler;
        let (results_tx, results_rx) = mpsc::channel(crawler.results_buffer);
        let spider = Arc::new(Spider::new(self.config.selectors.clone(), results_tx));

        let (scheduler, mut errors) = Scheduler::new(crawler, self.client.clone(), spider);
        let pending = scheduler.pending();

        scheduler
            .dispatcher()
            .dispatch(CrawlRequest::list(crawler.start_url.as_str()));

        tracing::info!("Starting crawl of {}", crawler.start_url);

        let error_drain = tokio::spawn(async move {
            while let Some(error) = errors.recv().await {
                tracing::warn!("Crawl error: {}", error);
            }
        });

        let scheduler_task = tokio::spawn(scheduler.run());

        let deadline = crawler.deadline();
        let records = Collector::new(results_rx)
            .collect_until(async {
                tokio::select! {
                    _ = pending.wait_idle() => {
                        tracing::debug!("All dispatched requests finished");
                    }
                    _ = tokio::time::sleep(deadline) => {
                        tracing::warn!(
                            "Crawl deadline of {:?} reached, abandoning {} outstanding requests",
                            deadline,
                            pending.outstanding()
                        );
                    }
                }
            })
            .await;

        if pending.outstanding() > 0 {
            scheduler_task.abort();
            error_drain.abort();
            if let Err(e) = scheduler_task.await {
                if !e.is_cancelled() {
                    return Err(e.into());
                }
            }
        } else {
            scheduler_task.await?;
            // Every dispatch handle is gone once the scheduler returns
            if let Err(e) = error_drain.await {
                if e.is_panic() {
                    tracing::error!("Crawl error drain panicked: {}", e);
                }
            }
        }

        Ok(records)
    }
}

/// Runs a complete crawl and writes the records to `output`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `output` - Path of the JSON file to create or truncate
///
/// # Returns
///
/// * `Ok(usize)` - Number of records written
/// * `Err(CensusError)` - Client setup or writing the file failed
pub async fn run_crawl(config: Config, output: &Path) -> Result<usize, CensusError> {
    let coordinator = Coordinator::new(config)?;
    let records = coordinator.run().await?;

    write_records(output, &records)?;
    tracing::info!("Done ({} user agents)", records.len());

    Ok(records.len())
}
