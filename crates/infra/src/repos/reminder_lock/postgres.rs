use super::IReminderLockRepo;
use chrono::NaiveDate;
use forening_domain::{LeadTime, ID};
use sqlx::PgPool;

pub struct PostgresReminderLockRepo {
    pool: PgPool,
}

impl PostgresReminderLockRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl IReminderLockRepo for PostgresReminderLockRepo {
    async fn acquire(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> anyhow::Result<bool> {
        // The primary key makes the insert a compare-and-set: the row
        // either lands or a competing run already owns the lock
        let res = sqlx::query(
            r#"
            INSERT INTO reminder_locks
            (event_uid, occurrence_date, lead)
            VALUES($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(occurrence_date)
        .bind(lead.as_str())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    async fn release(
        &self,
        event_id: &ID,
        occurrence_date: NaiveDate,
        lead: LeadTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminder_locks
            WHERE event_uid = $1 AND occurrence_date = $2 AND lead = $3
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(occurrence_date)
        .bind(lead.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
