use super::ITemplateRepo;
use forening_domain::{MessageTemplate, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresTemplateRepo {
    pool: PgPool,
}

impl PostgresTemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TemplateRaw {
    template_uid: Uuid,
    organization_uid: Uuid,
    name: String,
    body: String,
}

impl Into<MessageTemplate> for TemplateRaw {
    fn into(self) -> MessageTemplate {
        MessageTemplate {
            id: self.template_uid.into(),
            organization_id: self.organization_uid.into(),
            name: self.name,
            body: self.body,
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for PostgresTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO message_templates
            (template_uid, organization_uid, name, body)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(template.id.inner_ref())
        .bind(template.organization_id.inner_ref())
        .bind(&template.name)
        .bind(&template.body)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            SELECT * FROM message_templates
            WHERE template_uid = $1
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find template query failed: {:?}", e);
            None
        })
        .map(|template| template.into())
    }

    async fn delete(&self, template_id: &ID) -> Option<MessageTemplate> {
        sqlx::query_as::<_, TemplateRaw>(
            r#"
            DELETE FROM message_templates
            WHERE template_uid = $1
            RETURNING *
            "#,
        )
        .bind(template_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|template| template.into())
    }
}
