mod inmemory;
mod postgres;

use forening_domain::{Message, MessageRecipient, ID};
pub use inmemory::InMemoryMessageRepo;
pub use postgres::PostgresMessageRepo;

#[async_trait::async_trait]
pub trait IMessageRepo: Send + Sync {
    async fn insert(&self, message: &Message) -> anyhow::Result<()>;
    /// Messages are append-only audit records, only the status moves
    async fn update_status(&self, message: &Message) -> anyhow::Result<()>;
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Message>>;
    async fn insert_recipient(&self, recipient: &MessageRecipient) -> anyhow::Result<()>;
    /// Transitions the delivery status and attaches the provider error,
    /// everything else stays as inserted
    async fn update_recipient_status(&self, recipient: &MessageRecipient) -> anyhow::Result<()>;
    async fn find_recipients_by_message(
        &self,
        message_id: &ID,
    ) -> anyhow::Result<Vec<MessageRecipient>>;
}
