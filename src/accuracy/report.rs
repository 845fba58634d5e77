use crate::accuracy::RecordCheck;
use std::fmt;

/// Aggregated accuracy over a record file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccuracyReport {
    /// Records with a recognized category
    pub total: u64,

    /// Records where at least one string got the expected verdict
    pub success: u64,

    /// Individual strings classified against expectation
    pub mismatches: u64,

    /// Records skipped for an unrecognized category
    pub skipped: u64,
}

impl AccuracyReport {
    pub fn add(&mut self, check: &RecordCheck) {
        self.total += 1;
        if check.success {
            self.success += 1;
        }
        self.mismatches += check.mismatches.len() as u64;
    }

    /// Returns the success rate as a percentage
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.success as f64 / self.total as f64) * 100.0
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "done {}/{} {:.2}%",
            self.success,
            self.total,
            self.percentage()
        )
    }
}
