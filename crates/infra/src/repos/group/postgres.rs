use super::IGroupRepo;
use forening_domain::{MemberGroup, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresGroupRepo {
    pool: PgPool,
}

impl PostgresGroupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRaw {
    group_uid: Uuid,
    organization_uid: Uuid,
    name: String,
}

impl Into<MemberGroup> for GroupRaw {
    fn into(self) -> MemberGroup {
        MemberGroup {
            id: self.group_uid.into(),
            organization_id: self.organization_uid.into(),
            name: self.name,
        }
    }
}

#[async_trait::async_trait]
impl IGroupRepo for PostgresGroupRepo {
    async fn insert(&self, group: &MemberGroup) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO member_groups
            (group_uid, organization_uid, name)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(group.id.inner_ref())
        .bind(group.organization_id.inner_ref())
        .bind(&group.name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, group_id: &ID) -> Option<MemberGroup> {
        sqlx::query_as::<_, GroupRaw>(
            r#"
            SELECT * FROM member_groups
            WHERE group_uid = $1
            "#,
        )
        .bind(group_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find group query failed: {:?}", e);
            None
        })
        .map(|group| group.into())
    }

    async fn find_by_ids(
        &self,
        organization_id: &ID,
        group_ids: &[ID],
    ) -> anyhow::Result<Vec<MemberGroup>> {
        let ids = group_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let groups = sqlx::query_as::<_, GroupRaw>(
            r#"
            SELECT * FROM member_groups
            WHERE organization_uid = $1 AND group_uid = ANY($2)
            "#,
        )
        .bind(organization_id.inner_ref())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(groups.into_iter().map(|group| group.into()).collect())
    }

    async fn delete(&self, group_id: &ID) -> Option<MemberGroup> {
        sqlx::query_as::<_, GroupRaw>(
            r#"
            DELETE FROM member_groups
            WHERE group_uid = $1
            RETURNING *
            "#,
        )
        .bind(group_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|group| group.into())
    }
}
