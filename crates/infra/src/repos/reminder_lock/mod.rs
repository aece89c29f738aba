mod inmemory;
mod postgres;

use chrono::NaiveDate;
use forening_domain::{LeadTime, ID};
pub use inmemory::InMemoryReminderLockRepo;
pub use postgres::PostgresReminderLockRepo;

/// Single-flight lock taken before dispatching an occurrence, keyed the
/// same way as the sent-log. Two runs racing on one occurrence agree on
/// a winner here instead of both sending; the sent-log check stays as
/// the second guard.
#[async_trait::async_trait]
pub trait IReminderLockRepo: Send + Sync {
    /// Returns false when another run already holds the lock
    async fn acquire(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> anyhow::Result<bool>;
    async fn release(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use crate::ForeningContext;
    use chrono::NaiveDate;
    use forening_domain::{LeadTime, ID};

    #[tokio::test]
    async fn second_acquire_loses_until_release() {
        let ctx = ForeningContext::create_inmemory();
        let event_id = ID::default();
        let date = NaiveDate::from_ymd(2025, 6, 9);

        assert!(ctx
            .repos
            .reminder_locks
            .acquire(&event_id, date, LeadTime::DayBefore)
            .await
            .unwrap());
        assert!(!ctx
            .repos
            .reminder_locks
            .acquire(&event_id, date, LeadTime::DayBefore)
            .await
            .unwrap());
        // A different key is free
        assert!(ctx
            .repos
            .reminder_locks
            .acquire(&event_id, date, LeadTime::DayOf)
            .await
            .unwrap());

        ctx.repos
            .reminder_locks
            .release(&event_id, date, LeadTime::DayBefore)
            .await
            .unwrap();
        assert!(ctx
            .repos
            .reminder_locks
            .acquire(&event_id, date, LeadTime::DayBefore)
            .await
            .unwrap());
    }
}
