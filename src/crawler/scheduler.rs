//! Scheduler for dispatched crawl requests
//!
//! This module handles:
//! - A bounded queue of requests waiting to be fetched
//! - Global concurrency limiting via a semaphore
//! - Tracking outstanding work so the crawl knows when it is finished
//! - Reporting per-request failures on an error stream
//!
//! Every dispatched request holds a [`WorkGuard`] from the moment it is
//! queued until its handler has returned (for detail pages: until the record
//! has been handed to the collector). A handler dispatches its follow-ups
//! while still holding its own guard, so the outstanding count cannot reach
//! zero while any dispatched work could still produce a record.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::request::CrawlRequest;
use crate::crawler::spider::Spider;
use crate::FetchError;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, Notify, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

/// Something that accepts follow-up requests from a page handler
pub trait Dispatcher {
    /// Queues `request` for fetching; failures are reported, not returned
    fn dispatch(&self, request: CrawlRequest);
}

/// Count of dispatched requests whose handlers have not finished
#[derive(Debug, Default)]
pub struct PendingWork {
    count: AtomicUsize,
    idle: Notify,
}

impl PendingWork {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers one unit of outstanding work, released when the guard drops
    pub fn begin(self: &Arc<Self>) -> WorkGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        WorkGuard {
            pending: Arc::clone(self),
        }
    }

    /// Returns the number of units still outstanding
    pub fn outstanding(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Waits until no work is outstanding
    ///
    /// Returns immediately if nothing has been registered.
    pub async fn wait_idle(&self) {
        loop {
            // Register interest before checking, so a release in between is not missed
            let notified = self.idle.notified();
            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn finish(&self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// RAII handle for one unit of outstanding work
#[derive(Debug)]
pub struct WorkGuard {
    pending: Arc<PendingWork>,
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        self.pending.finish();
    }
}

/// A request sitting in the queue, together with its work guard
#[derive(Debug)]
pub struct Queued {
    pub request: CrawlRequest,
    guard: WorkGuard,
}

/// Cloneable dispatch handle feeding the scheduler queue
#[derive(Debug, Clone)]
pub struct Dispatch {
    queue: mpsc::Sender<Queued>,
    pending: Arc<PendingWork>,
    errors: mpsc::UnboundedSender<FetchError>,
}

impl Dispatch {
    /// Reports a non-fatal error on the error stream
    pub fn report(&self, error: FetchError) {
        if let Err(mpsc::error::SendError(error)) = self.errors.send(error) {
            // Nobody is draining any more; keep the error visible
            tracing::warn!("Crawl error: {}", error);
        }
    }
}

impl Dispatcher for Dispatch {
    fn dispatch(&self, request: CrawlRequest) {
        let guard = self.pending.begin();
        tracing::trace!("Queueing {} request for '{}'", request.callback.name(), request.url);

        match self.queue.try_send(Queued { request, guard }) {
            Ok(()) => {}
            Err(TrySendError::Full(rejected)) | Err(TrySendError::Closed(rejected)) => {
                self.report(FetchError::QueueFull {
                    url: rejected.request.url.clone(),
                });
            }
        }
    }
}

/// Scheduler runs queued requests through the fetcher and the spider
///
/// The scheduler coordinates:
/// - The bounded request queue (`queue-capacity`)
/// - Global concurrency (`concurrency` fetches in flight)
/// - Worker tasks, one per request
pub struct Scheduler {
    queue: mpsc::Receiver<Queued>,
    dispatch: Dispatch,
    semaphore: Arc<Semaphore>,
    client: Client,
    spider: Arc<Spider>,
}

impl Scheduler {
    /// Creates a new scheduler and the stream of fetch errors it will report
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `client` - HTTP client shared by all workers
    /// * `spider` - Page handlers
    pub fn new(
        config: &CrawlerConfig,
        client: Client,
        spider: Arc<Spider>,
    ) -> (Self, mpsc::UnboundedReceiver<FetchError>) {
        let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity);
        let (errors_tx, errors_rx) = mpsc::unbounded_channel();

        let dispatch = Dispatch {
            queue: queue_tx,
            pending: PendingWork::new(),
            errors: errors_tx,
        };

        let scheduler = Self {
            queue: queue_rx,
            dispatch,
            semaphore: Arc::new(Semaphore::new(config.concurrency as usize)),
            client,
            spider,
        };

        (scheduler, errors_rx)
    }

    /// Returns a handle for dispatching requests into this scheduler
    pub fn dispatcher(&self) -> Dispatch {
        self.dispatch.clone()
    }

    /// Returns the outstanding-work counter
    pub fn pending(&self) -> Arc<PendingWork> {
        Arc::clone(&self.dispatch.pending)
    }

    /// Runs queued requests until no dispatched work remains
    ///
    /// Returns immediately if nothing was dispatched before the call.
    pub async fn run(mut self) {
        let pending = self.pending();
        let mut tasks = JoinSet::new();

        loop {
            let queued = tokio::select! {
                biased;
                queued = self.queue.recv() => match queued {
                    Some(queued) => queued,
                    None => break,
                },
                _ = pending.wait_idle() => break,
            };

            let permit = match Arc::clone(&self.semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            tracing::debug!(
                "Fetching {} ({} outstanding)",
                queued.request.url,
                pending.outstanding()
            );

            tasks.spawn(process(
                queued,
                self.client.clone(),
                Arc::clone(&self.spider),
                self.dispatch.clone(),
                permit,
            ));

            while let Some(joined) = tasks.try_join_next() {
                log_join_result(joined);
            }
        }

        while let Some(joined) = tasks.join_next().await {
            log_join_result(joined);
        }
    }
}

fn log_join_result(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        if e.is_panic() {
            tracing::error!("Crawl worker panicked: {}", e);
        }
    }
}

/// Fetches one request and hands the response to its handler
async fn process(
    queued: Queued,
    client: Client,
    spider: Arc<Spider>,
    dispatch: Dispatch,
    permit: OwnedSemaphorePermit,
) {
    let Queued { request, guard } = queued;

    let page = match fetch_page(&client, &request).await {
        Ok(page) => page,
        Err(e) => {
            dispatch.report(e);
            return;
        }
    };
    drop(permit);

    match spider.handle(&request, &page, &dispatch) {
        Ok(Some(record)) => {
            if let Err(e) = spider.emit(record).await {
                dispatch.report(FetchError::Handler {
                    url: request.url.clone(),
                    source: Box::new(e),
                });
            }
        }
        Ok(None) => {}
        Err(e) => dispatch.report(FetchError::Handler {
            url: request.url.clone(),
            source: Box::new(e),
        }),
    }

    drop(guard);
}
