mod event;
mod group;
mod member;
mod message;
mod organization;
mod reminder_lock;
mod run_execution;
mod sent_log;
mod shared;
mod template;

use event::{IEventRepo, InMemoryEventRepo, PostgresEventRepo};
use group::{IGroupRepo, InMemoryGroupRepo, PostgresGroupRepo};
use member::{IMemberRepo, InMemoryMemberRepo, PostgresMemberRepo};
use message::{IMessageRepo, InMemoryMessageRepo, PostgresMessageRepo};
use organization::{IOrganizationRepo, InMemoryOrganizationRepo, PostgresOrganizationRepo};
use reminder_lock::{IReminderLockRepo, InMemoryReminderLockRepo, PostgresReminderLockRepo};
use run_execution::{IRunExecutionRepo, InMemoryRunExecutionRepo, PostgresRunExecutionRepo};
use sent_log::{IReminderSentLogRepo, InMemoryReminderSentLogRepo, PostgresReminderSentLogRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use template::{ITemplateRepo, InMemoryTemplateRepo, PostgresTemplateRepo};
use tracing::info;

pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub organizations: Arc<dyn IOrganizationRepo>,
    pub members: Arc<dyn IMemberRepo>,
    pub groups: Arc<dyn IGroupRepo>,
    pub events: Arc<dyn IEventRepo>,
    pub templates: Arc<dyn ITemplateRepo>,
    pub messages: Arc<dyn IMessageRepo>,
    pub sent_logs: Arc<dyn IReminderSentLogRepo>,
    pub reminder_locks: Arc<dyn IReminderLockRepo>,
    pub run_executions: Arc<dyn IRunExecutionRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            organizations: Arc::new(PostgresOrganizationRepo::new(pool.clone())),
            members: Arc::new(PostgresMemberRepo::new(pool.clone())),
            groups: Arc::new(PostgresGroupRepo::new(pool.clone())),
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            templates: Arc::new(PostgresTemplateRepo::new(pool.clone())),
            messages: Arc::new(PostgresMessageRepo::new(pool.clone())),
            sent_logs: Arc::new(PostgresReminderSentLogRepo::new(pool.clone())),
            reminder_locks: Arc::new(PostgresReminderLockRepo::new(pool.clone())),
            run_executions: Arc::new(PostgresRunExecutionRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            organizations: Arc::new(InMemoryOrganizationRepo::new()),
            members: Arc::new(InMemoryMemberRepo::new()),
            groups: Arc::new(InMemoryGroupRepo::new()),
            events: Arc::new(InMemoryEventRepo::new()),
            templates: Arc::new(InMemoryTemplateRepo::new()),
            messages: Arc::new(InMemoryMessageRepo::new()),
            sent_logs: Arc::new(InMemoryReminderSentLogRepo::new()),
            reminder_locks: Arc::new(InMemoryReminderLockRepo::new()),
            run_executions: Arc::new(InMemoryRunExecutionRepo::new()),
        }
    }
}
