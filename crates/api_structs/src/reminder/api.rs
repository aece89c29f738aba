use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod run_reminders {
    use super::*;

    /// Outcome of one scheduler run. Returned with 200 even when some
    /// events or recipients failed; only a setup-time failure produces
    /// an error status code.
    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub sent: usize,
        pub errors: usize,
        pub processed: usize,
        pub events_processed: usize,
        pub date: NaiveDate,
        #[serde(rename = "duration_ms")]
        pub duration_ms: i64,
        pub status: String,
    }
}
