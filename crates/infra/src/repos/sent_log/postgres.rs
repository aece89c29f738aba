use super::IReminderSentLogRepo;
use crate::repos::shared::repo::DeleteResult;
use chrono::NaiveDate;
use forening_domain::{LeadTime, ReminderSentLog, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresReminderSentLogRepo {
    pool: PgPool,
}

impl PostgresReminderSentLogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SentLogRaw {
    event_uid: Uuid,
    organization_uid: Uuid,
    occurrence_date: NaiveDate,
    lead: String,
    sent_count: i32,
    created: i64,
}

impl Into<Option<ReminderSentLog>> for SentLogRaw {
    fn into(self) -> Option<ReminderSentLog> {
        Some(ReminderSentLog {
            event_id: self.event_uid.into(),
            organization_id: self.organization_uid.into(),
            occurrence_date: self.occurrence_date,
            lead: self.lead.parse().ok()?,
            sent_count: self.sent_count as usize,
            created: self.created,
        })
    }
}

#[async_trait::async_trait]
impl IReminderSentLogRepo for PostgresReminderSentLogRepo {
    async fn insert(&self, log: &ReminderSentLog) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_sent_log
            (event_uid, organization_uid, occurrence_date, lead, sent_count, created)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(log.event_id.inner_ref())
        .bind(log.organization_id.inner_ref())
        .bind(log.occurrence_date)
        .bind(log.lead.as_str())
        .bind(log.sent_count as i32)
        .bind(log.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> Option<ReminderSentLog> {
        sqlx::query_as::<_, SentLogRaw>(
            r#"
            SELECT * FROM reminder_sent_log
            WHERE event_uid = $1 AND occurrence_date = $2 AND lead = $3
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(occurrence_date)
        .bind(lead.as_str())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find sent log query failed: {:?}", e);
            None
        })
        .and_then(|log| log.into())
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminder_sent_log
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}
