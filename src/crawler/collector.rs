//! Result collector draining the record channel

use crate::record::UserAgentRecord;
use std::future::Future;
use tokio::sync::mpsc;

/// Gathers emitted records in arrival order
pub struct Collector {
    results: mpsc::Receiver<UserAgentRecord>,
    records: Vec<UserAgentRecord>,
}

impl Collector {
    pub fn new(results: mpsc::Receiver<UserAgentRecord>) -> Self {
        Self {
            results,
            records: Vec::new(),
        }
    }

    /// Receives records until `done` resolves or every sender is gone
    ///
    /// Records already buffered in the channel when `done` resolves are
    /// still collected, so a producer that emitted before signalling
    /// completion is never lost.
    pub async fn collect_until<F>(mut self, done: F) -> Vec<UserAgentRecord>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(done);

        loop {
            tokio::select! {
                biased;
                received = self.results.recv() => match received {
                    Some(record) => self.records.push(record),
                    None => return self.records,
                },
                _ = &mut done => break,
            }
        }

        while let Ok(record) = self.results.try_recv() {
            self.records.push(record);
        }

        tracing::debug!("Collected {} records", self.records.len());
        self.records
    }
}
