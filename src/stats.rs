use std::time::Duration;

use crate::lookup::FetchError;

/// What happened to a single token.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Success {
        organization: String,
        http_seconds: f64,
        parse_seconds: f64,
    },
    NotFound {
        http_seconds: f64,
    },
    Timeout,
    RequestFailed {
        detail: String,
    },
    SkippedIp,
}

impl From<FetchError> for LookupOutcome {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout => LookupOutcome::Timeout,
            other => LookupOutcome::RequestFailed {
                detail: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunStats {
    pub found: u32,
    pub not_found: u32,
    pub timed_out: u32,
    pub failed: u32,
    pub skipped: u32,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn record(&mut self, outcome: &LookupOutcome) {
        match outcome {
            LookupOutcome::Success { .. } => self.found += 1,
            LookupOutcome::NotFound { .. } => self.not_found += 1,
            LookupOutcome::Timeout => self.timed_out += 1,
            LookupOutcome::RequestFailed { .. } => self.failed += 1,
            LookupOutcome::SkippedIp => self.skipped += 1,
        }
    }

    /// Number of rows written to the report.
    pub fn rows(&self) -> u32 {
        self.found + self.not_found + self.timed_out + self.failed
    }
}
