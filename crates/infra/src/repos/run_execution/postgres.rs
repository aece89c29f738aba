use super::IRunExecutionRepo;
use chrono::NaiveDate;
use forening_domain::{RunExecution, RunStatus, RunError};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresRunExecutionRepo {
    pool: PgPool,
}

impl PostgresRunExecutionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RunExecutionRaw {
    run_uid: Uuid,
    run_date: NaiveDate,
    status: String,
    processed: i32,
    sent: i32,
    errors: i32,
    events_with_sends: i32,
    duration_ms: i64,
    error_sample: serde_json::Value,
    created: i64,
}

impl Into<RunExecution> for RunExecutionRaw {
    fn into(self) -> RunExecution {
        let status = match self.status.as_str() {
            "completed" => RunStatus::Completed,
            "completed_with_errors" => RunStatus::CompletedWithErrors,
            _ => RunStatus::Failed,
        };
        let error_sample =
            serde_json::from_value::<Vec<RunError>>(self.error_sample).unwrap_or_default();
        RunExecution {
            id: self.run_uid.into(),
            run_date: self.run_date,
            status,
            processed: self.processed as usize,
            sent: self.sent as usize,
            errors: self.errors as usize,
            events_with_sends: self.events_with_sends as usize,
            duration_ms: self.duration_ms,
            error_sample,
            created: self.created,
        }
    }
}

#[async_trait::async_trait]
impl IRunExecutionRepo for PostgresRunExecutionRepo {
    async fn insert(&self, execution: &RunExecution) -> anyhow::Result<()> {
        let error_sample =
            serde_json::to_value(&execution.error_sample).unwrap_or(serde_json::Value::Null);
        sqlx::query(
            r#"
            INSERT INTO run_executions
            (run_uid, run_date, status, processed, sent, errors, events_with_sends, duration_ms, error_sample, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(execution.id.inner_ref())
        .bind(execution.run_date)
        .bind(execution.status.as_str())
        .bind(execution.processed as i32)
        .bind(execution.sent as i32)
        .bind(execution.errors as i32)
        .bind(execution.events_with_sends as i32)
        .bind(execution.duration_ms)
        .bind(error_sample)
        .bind(execution.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_latest(&self) -> Option<RunExecution> {
        sqlx::query_as::<_, RunExecutionRaw>(
            r#"
            SELECT * FROM run_executions
            ORDER BY created DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find latest run execution query failed: {:?}", e);
            None
        })
        .map(|execution| execution.into())
    }
}
