mod inmemory;
mod postgres;

use forening_domain::{Event, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, event: &Event) -> anyhow::Result<()>;
    async fn save(&self, event: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    /// All reminder-enabled events across every organization. This is
    /// the scheduler's work list for a run.
    async fn find_reminder_enabled(&self) -> anyhow::Result<Vec<Event>>;
    async fn delete(&self, event_id: &ID) -> Option<Event>;
}
