use crate::event::LeadTime;
use crate::shared::entity::ID;
use chrono::NaiveDate;

/// Append-only idempotency marker for a dispatched reminder.
///
/// The composite key (event, occurrence date, lead policy) is what
/// guarantees at-most-once delivery per occurrence: its presence makes
/// a later run skip the occurrence entirely. Written only after at
/// least one recipient send succeeded, so a fully failed occurrence
/// stays retryable.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSentLog {
    pub event_id: ID,
    pub organization_id: ID,
    pub occurrence_date: NaiveDate,
    pub lead: LeadTime,
    /// How many recipients were successfully sent to
    pub sent_count: usize,
    pub created: i64,
}

impl ReminderSentLog {
    pub fn new(
        event_id: ID,
        organization_id: ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
        sent_count: usize,
        created: i64,
    ) -> Self {
        Self {
            event_id,
            organization_id,
            occurrence_date,
            lead,
            sent_count,
            created,
        }
    }
}
