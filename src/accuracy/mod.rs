//! Accuracy checker for bot heuristics
//!
//! This module handles:
//! - The classifier seam ([`BotClassifier`]) and its `isbot`-backed default
//! - Mapping record categories to an expected verdict
//! - Checking records and aggregating the success percentage

mod classifier;
mod report;

pub use classifier::{BotClassifier, IsBotClassifier};
pub use report::AccuracyReport;

use crate::record::UserAgentRecord;

/// Category label of records whose strings should be classified as bots
pub const BOT_CATEGORY: &str = "crawlers";

/// Category label of records whose strings should not be classified as bots
pub const NOT_BOT_CATEGORY: &str = "browsers";

/// The verdict a record's category leads us to expect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Bot,
    NotBot,
}

impl Expectation {
    /// Maps an exact category label to its expectation; other labels are not checked
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            BOT_CATEGORY => Some(Expectation::Bot),
            NOT_BOT_CATEGORY => Some(Expectation::NotBot),
            _ => None,
        }
    }

    pub fn matches(self, is_bot: bool) -> bool {
        match self {
            Expectation::Bot => is_bot,
            Expectation::NotBot => !is_bot,
        }
    }
}

/// Outcome of checking one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCheck {
    /// Whether at least one string got the expected verdict
    pub success: bool,

    /// Strings classified against expectation before the first hit
    pub mismatches: Vec<String>,
}

/// Checks one record against the classifier
///
/// Strings are classified in order until one matches the expectation; that
/// single hit validates the whole record. Each mismatch seen on the way is
/// logged as a warning.
///
/// # Returns
///
/// * `Some(RecordCheck)` - The record has a recognized category
/// * `None` - The record was skipped
pub fn check_record(
    record: &UserAgentRecord,
    classifier: &dyn BotClassifier,
) -> Option<RecordCheck> {
    let expectation = Expectation::from_category(&record.category)?;
    let mut mismatches = Vec::new();

    for user_agent in &record.user_agents {
        let is_bot = classifier.is_bot(user_agent);
        if expectation.matches(is_bot) {
            return Some(RecordCheck {
                success: true,
                mismatches,
            });
        }

        match expectation {
            Expectation::Bot => {
                tracing::warn!("{} not recognized {:?}", record.category, user_agent)
            }
            Expectation::NotBot => {
                tracing::warn!("{} recognized as bot {:?}", record.category, user_agent)
            }
        }
        mismatches.push(user_agent.clone());
    }

    Some(RecordCheck {
        success: false,
        mismatches,
    })
}

/// Checks every record and aggregates the results
pub fn check_records(
    records: &[UserAgentRecord],
    classifier: &dyn BotClassifier,
) -> AccuracyReport {
    let mut report = AccuracyReport::default();

    for record in records {
        match check_record(record, classifier) {
            Some(check) => report.add(&check),
            None => {
                tracing::debug!(
                    "Skipping {:?}/{:?}: category not checked",
                    record.category,
                    record.title
                );
                report.skipped += 1;
            }
        }
    }

    report
}
