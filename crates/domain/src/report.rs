use crate::shared::entity::ID;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Upper bound on structured errors kept per run. Overflowing errors
/// are still counted, just not retained.
pub const RUN_ERROR_SAMPLE_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Missing provider config, no valid recipient ids, nothing resolved
    Validation,
    /// Store reads/writes failed
    Database,
    /// Provider unreachable or timed out
    Network,
    /// Provider answered with a failure payload
    Api,
    /// Anything uncategorized during per-event processing
    Unknown,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Validation => "validation",
            Self::Database => "database",
            Self::Network => "network",
            Self::Api => "api",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One structured error tied to an event during a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunError {
    pub event_id: Option<ID>,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Aggregated outcome of one scheduler run across all tenants
#[derive(Debug, Default)]
pub struct RunReport {
    /// Recipients processed, including failed ones
    pub processed: usize,
    /// Recipients successfully sent to
    pub sent: usize,
    /// Recipient- and event-level failures
    pub errors: usize,
    /// Distinct events with at least one successful send
    pub events_with_sends: usize,
    error_sample: Vec<RunError>,
    dropped_errors: usize,
}

impl RunReport {
    pub fn new() -> Self {
        Default::default()
    }

    /// Folds the outcome of one occurrence dispatch into the report
    pub fn record_dispatch(&mut self, sent: usize, failed: usize) {
        self.processed += sent + failed;
        self.sent += sent;
        self.errors += failed;
        if sent > 0 {
            self.events_with_sends += 1;
        }
    }

    pub fn record_error(&mut self, error: RunError) {
        self.errors += 1;
        self.attach_error(error);
    }

    /// Keeps the structured error without touching the counters, for
    /// recipient failures already counted through `record_dispatch`
    pub fn attach_error(&mut self, error: RunError) {
        if self.error_sample.len() < RUN_ERROR_SAMPLE_LIMIT {
            self.error_sample.push(error);
        } else {
            self.dropped_errors += 1;
        }
    }

    pub fn error_sample(&self) -> &[RunError] {
        &self.error_sample
    }

    pub fn dropped_errors(&self) -> usize {
        self.dropped_errors
    }

    pub fn status(&self) -> RunStatus {
        if self.errors == 0 {
            RunStatus::Completed
        } else {
            RunStatus::CompletedWithErrors
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    CompletedWithErrors,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::CompletedWithErrors => "completed_with_errors",
            Self::Failed => "failed",
        }
    }
}

/// Durable record of one scheduler run, for operational visibility
#[derive(Debug, Clone)]
pub struct RunExecution {
    pub id: ID,
    pub run_date: NaiveDate,
    pub status: RunStatus,
    pub processed: usize,
    pub sent: usize,
    pub errors: usize,
    pub events_with_sends: usize,
    pub duration_ms: i64,
    pub error_sample: Vec<RunError>,
    pub created: i64,
}

impl RunExecution {
    pub fn from_report(
        report: &RunReport,
        run_date: NaiveDate,
        duration_ms: i64,
        created: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            run_date,
            status: report.status(),
            processed: report.processed,
            sent: report.sent,
            errors: report.errors,
            events_with_sends: report.events_with_sends,
            duration_ms,
            error_sample: report.error_sample().to_vec(),
            created,
        }
    }
}
