mod inmemory;
mod postgres;

use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
use forening_domain::{LeadTime, ReminderSentLog, ID};
pub use inmemory::InMemoryReminderSentLogRepo;
pub use postgres::PostgresReminderSentLogRepo;

/// The sent-log is the durable idempotency marker: one row per
/// dispatched (event, occurrence date, lead policy) triple. Rows are
/// never updated.
#[async_trait::async_trait]
pub trait IReminderSentLogRepo: Send + Sync {
    async fn insert(&self, log: &ReminderSentLog) -> anyhow::Result<()>;
    async fn find(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> Option<ReminderSentLog>;
    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult>;
}

#[cfg(test)]
mod tests {
    use crate::ForeningContext;
    use chrono::NaiveDate;
    use forening_domain::{LeadTime, ReminderSentLog};

    #[tokio::test]
    async fn keyed_by_event_date_and_lead() {
        let ctx = ForeningContext::create_inmemory();
        let log = ReminderSentLog::new(
            Default::default(),
            Default::default(),
            NaiveDate::from_ymd(2025, 6, 9),
            LeadTime::DayBefore,
            2,
            0,
        );
        ctx.repos.sent_logs.insert(&log).await.unwrap();

        assert!(ctx
            .repos
            .sent_logs
            .find(&log.event_id, log.occurrence_date, LeadTime::DayBefore)
            .await
            .is_some());
        // Same occurrence under the other policy is a different key
        assert!(ctx
            .repos
            .sent_logs
            .find(&log.event_id, log.occurrence_date, LeadTime::DayOf)
            .await
            .is_none());
        // Another date is a different key
        assert!(ctx
            .repos
            .sent_logs
            .find(
                &log.event_id,
                NaiveDate::from_ymd(2025, 6, 16),
                LeadTime::DayBefore
            )
            .await
            .is_none());

        let res = ctx
            .repos
            .sent_logs
            .delete_by_event(&log.event_id)
            .await
            .unwrap();
        assert_eq!(res.deleted_count, 1);
    }
}
