use super::IOrganizationRepo;
use forening_domain::{Organization, OrganizationSettings, SmsSettings, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresOrganizationRepo {
    pool: PgPool,
}

impl PostgresOrganizationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct OrganizationRaw {
    organization_uid: Uuid,
    name: String,
    sms_settings: Option<serde_json::Value>,
}

impl Into<Organization> for OrganizationRaw {
    fn into(self) -> Organization {
        let sms = self
            .sms_settings
            .and_then(|settings| serde_json::from_value::<SmsSettings>(settings).ok());
        Organization {
            id: self.organization_uid.into(),
            name: self.name,
            settings: OrganizationSettings { sms },
        }
    }
}

fn sms_settings_json(organization: &Organization) -> Option<serde_json::Value> {
    organization
        .settings
        .sms
        .as_ref()
        .and_then(|settings| serde_json::to_value(settings).ok())
}

#[async_trait::async_trait]
impl IOrganizationRepo for PostgresOrganizationRepo {
    async fn insert(&self, organization: &Organization) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO organizations
            (organization_uid, name, sms_settings)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(organization.id.inner_ref())
        .bind(&organization.name)
        .bind(sms_settings_json(organization))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, organization: &Organization) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE organizations
            SET name = $2, sms_settings = $3
            WHERE organization_uid = $1
            "#,
        )
        .bind(organization.id.inner_ref())
        .bind(&organization.name)
        .bind(sms_settings_json(organization))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, organization_id: &ID) -> Option<Organization> {
        sqlx::query_as::<_, OrganizationRaw>(
            r#"
            SELECT * FROM organizations
            WHERE organization_uid = $1
            "#,
        )
        .bind(organization_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find organization query failed: {:?}", e);
            None
        })
        .map(|organization| organization.into())
    }

    async fn delete(&self, organization_id: &ID) -> Option<Organization> {
        sqlx::query_as::<_, OrganizationRaw>(
            r#"
            DELETE FROM organizations
            WHERE organization_uid = $1
            RETURNING *
            "#,
        )
        .bind(organization_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|organization| organization.into())
    }
}
