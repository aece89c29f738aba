use super::IEventRepo;
use chrono::{NaiveDate, NaiveTime};
use forening_domain::{Event, EventReminder, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    organization_uid: Uuid,
    name: String,
    description: Option<String>,
    anchor_date: NaiveDate,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    location: Option<String>,
    frequency: Option<String>,
    reminder: Option<serde_json::Value>,
}

impl Into<Event> for EventRaw {
    fn into(self) -> Event {
        Event {
            id: self.event_uid.into(),
            organization_id: self.organization_uid.into(),
            name: self.name,
            description: self.description,
            anchor_date: self.anchor_date,
            end_date: self.end_date,
            start_time: self.start_time,
            location: self.location,
            frequency: self.frequency.and_then(|f| f.parse().ok()),
            reminder: self
                .reminder
                .and_then(|r| serde_json::from_value::<EventReminder>(r).ok()),
        }
    }
}

fn reminder_json(event: &Event) -> Option<serde_json::Value> {
    event
        .reminder
        .as_ref()
        .and_then(|reminder| serde_json::to_value(reminder).ok())
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, event: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events
            (event_uid, organization_uid, name, description, anchor_date, end_date, start_time, location, frequency, reminder)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(event.organization_id.inner_ref())
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.anchor_date)
        .bind(event.end_date)
        .bind(event.start_time)
        .bind(&event.location)
        .bind(event.frequency.map(|f| f.to_string()))
        .bind(reminder_json(event))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, event: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE events
            SET name = $2, description = $3, anchor_date = $4, end_date = $5,
                start_time = $6, location = $7, frequency = $8, reminder = $9
            WHERE event_uid = $1
            "#,
        )
        .bind(event.id.inner_ref())
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.anchor_date)
        .bind(event.end_date)
        .bind(event.start_time)
        .bind(&event.location)
        .bind(event.frequency.map(|f| f.to_string()))
        .bind(reminder_json(event))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events
            WHERE event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find event query failed: {:?}", e);
            None
        })
        .map(|event| event.into())
    }

    async fn find_reminder_enabled(&self) -> anyhow::Result<Vec<Event>> {
        let events = sqlx::query_as::<_, EventRaw>(
            r#"
            SELECT * FROM events
            WHERE reminder IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events.into_iter().map(|event| event.into()).collect())
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        sqlx::query_as::<_, EventRaw>(
            r#"
            DELETE FROM events
            WHERE event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|event| event.into())
    }
}
