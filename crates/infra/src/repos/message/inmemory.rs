use super::IMessageRepo;
use crate::repos::shared::inmemory_repo::*;
use forening_domain::{Message, MessageRecipient, ID};

pub struct InMemoryMessageRepo {
    messages: std::sync::Mutex<Vec<Message>>,
    recipients: std::sync::Mutex<Vec<MessageRecipient>>,
}

impl InMemoryMessageRepo {
    pub fn new() -> Self {
        Self {
            messages: std::sync::Mutex::new(Vec::new()),
            recipients: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for InMemoryMessageRepo {
    async fn insert(&self, message: &Message) -> anyhow::Result<()> {
        insert(message, &self.messages);
        Ok(())
    }

    async fn update_status(&self, message: &Message) -> anyhow::Result<()> {
        update_many(
            &self.messages,
            |m| m.id == message.id,
            |m| m.status = message.status,
        );
        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Message>> {
        Ok(find_by(&self.messages, |m| m.event_id == *event_id))
    }

    async fn insert_recipient(&self, recipient: &MessageRecipient) -> anyhow::Result<()> {
        insert(recipient, &self.recipients);
        Ok(())
    }

    async fn update_recipient_status(&self, recipient: &MessageRecipient) -> anyhow::Result<()> {
        update_many(
            &self.recipients,
            |r| r.id == recipient.id,
            |r| {
                r.status = recipient.status;
                r.error = recipient.error.clone();
            },
        );
        Ok(())
    }

    async fn find_recipients_by_message(
        &self,
        message_id: &ID,
    ) -> anyhow::Result<Vec<MessageRecipient>> {
        Ok(find_by(&self.recipients, |r| r.message_id == *message_id))
    }
}
