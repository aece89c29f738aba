use super::IMessageRepo;
use chrono::NaiveDate;
use forening_domain::{DeliveryStatus, Message, MessageRecipient, MessageStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresMessageRepo {
    pool: PgPool,
}

impl PostgresMessageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MessageRaw {
    message_uid: Uuid,
    organization_uid: Uuid,
    event_uid: Uuid,
    occurrence_date: NaiveDate,
    body: String,
    recipient_count: i32,
    estimated_cost: f64,
    status: String,
    created: i64,
}

impl Into<Message> for MessageRaw {
    fn into(self) -> Message {
        Message {
            id: self.message_uid.into(),
            organization_id: self.organization_uid.into(),
            event_id: self.event_uid.into(),
            occurrence_date: self.occurrence_date,
            body: self.body,
            recipient_count: self.recipient_count as usize,
            estimated_cost: self.estimated_cost,
            status: self.status.parse().unwrap_or(MessageStatus::Failed),
            created: self.created,
        }
    }
}

#[derive(Debug, FromRow)]
struct MessageRecipientRaw {
    message_recipient_uid: Uuid,
    message_uid: Uuid,
    member_uid: Uuid,
    phone: String,
    text: String,
    status: String,
    error: Option<String>,
}

impl Into<MessageRecipient> for MessageRecipientRaw {
    fn into(self) -> MessageRecipient {
        MessageRecipient {
            id: self.message_recipient_uid.into(),
            message_id: self.message_uid.into(),
            member_id: self.member_uid.into(),
            phone: self.phone,
            text: self.text,
            status: self.status.parse().unwrap_or(DeliveryStatus::Failed),
            error: self.error,
        }
    }
}

#[async_trait::async_trait]
impl IMessageRepo for PostgresMessageRepo {
    async fn insert(&self, message: &Message) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO messages
            (message_uid, organization_uid, event_uid, occurrence_date, body, recipient_count, estimated_cost, status, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(message.id.inner_ref())
        .bind(message.organization_id.inner_ref())
        .bind(message.event_id.inner_ref())
        .bind(message.occurrence_date)
        .bind(&message.body)
        .bind(message.recipient_count as i32)
        .bind(message.estimated_cost)
        .bind(message.status.as_str())
        .bind(message.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_status(&self, message: &Message) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE messages
            SET status = $2
            WHERE message_uid = $1
            "#,
        )
        .bind(message.id.inner_ref())
        .bind(message.status.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, MessageRaw>(
            r#"
            SELECT * FROM messages
            WHERE event_uid = $1
            ORDER BY created
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(messages.into_iter().map(|message| message.into()).collect())
    }

    async fn insert_recipient(&self, recipient: &MessageRecipient) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO message_recipients
            (message_recipient_uid, message_uid, member_uid, phone, text, status, error)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(recipient.id.inner_ref())
        .bind(recipient.message_id.inner_ref())
        .bind(recipient.member_id.inner_ref())
        .bind(&recipient.phone)
        .bind(&recipient.text)
        .bind(recipient.status.as_str())
        .bind(&recipient.error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_recipient_status(&self, recipient: &MessageRecipient) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE message_recipients
            SET status = $2, error = $3
            WHERE message_recipient_uid = $1
            "#,
        )
        .bind(recipient.id.inner_ref())
        .bind(recipient.status.as_str())
        .bind(&recipient.error)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_recipients_by_message(
        &self,
        message_id: &ID,
    ) -> anyhow::Result<Vec<MessageRecipient>> {
        let recipients = sqlx::query_as::<_, MessageRecipientRaw>(
            r#"
            SELECT * FROM message_recipients
            WHERE message_uid = $1
            "#,
        )
        .bind(message_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(recipients
            .into_iter()
            .map(|recipient| recipient.into())
            .collect())
    }
}
