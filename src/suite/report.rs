//! Aggregated results of a suite run

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::checks::CheckResult;

#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub results: Vec<CheckResult>,
    /// The session DELETE was acknowledged
    pub logged_out: bool,
}

impl SuiteReport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            started_at: Utc::now(),
            results: Vec::new(),
            logged_out: false,
        }
    }

    /// No check failed; skipped checks do not count against the run
    pub fn all_passed(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_failed()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_skipped()).count()
    }

    pub fn total_duration(&self) -> Duration {
        self.results.iter().map(|r| r.duration).sum()
    }

    /// Failure messages, prefixed with the check name
    pub fn failures(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.outcome.is_failed())
            .map(|r| format!("{}: {}", r.check, r.outcome.message()))
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} failed, {} skipped in {:.1}s",
            self.passed_count(),
            self.failed_count(),
            self.skipped_count(),
            self.total_duration().as_secs_f64()
        )
    }
}
