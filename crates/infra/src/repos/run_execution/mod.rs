mod inmemory;
mod postgres;

use forening_domain::RunExecution;
pub use inmemory::InMemoryRunExecutionRepo;
pub use postgres::PostgresRunExecutionRepo;

#[async_trait::async_trait]
pub trait IRunExecutionRepo: Send + Sync {
    async fn insert(&self, execution: &RunExecution) -> anyhow::Result<()>;
    async fn find_latest(&self) -> Option<RunExecution>;
}

#[cfg(test)]
mod tests {
    use crate::ForeningContext;
    use chrono::NaiveDate;
    use forening_domain::{RunExecution, RunReport};

    #[tokio::test]
    async fn keeps_latest_run() {
        let ctx = ForeningContext::create_inmemory();
        let mut report = RunReport::new();
        report.record_dispatch(2, 0);

        let first =
            RunExecution::from_report(&report, NaiveDate::from_ymd(2025, 6, 8), 120, 1000);
        let second =
            RunExecution::from_report(&report, NaiveDate::from_ymd(2025, 6, 9), 95, 2000);
        ctx.repos.run_executions.insert(&first).await.unwrap();
        ctx.repos.run_executions.insert(&second).await.unwrap();

        let latest = ctx.repos.run_executions.find_latest().await.unwrap();
        assert_eq!(latest.run_date, NaiveDate::from_ymd(2025, 6, 9));
        assert_eq!(latest.sent, 2);
    }
}
