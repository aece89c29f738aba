use super::IMemberRepo;
use forening_domain::{Member, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresMemberRepo {
    pool: PgPool,
}

impl PostgresMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MemberRaw {
    member_uid: Uuid,
    organization_uid: Uuid,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    active: bool,
    groups: Vec<String>,
}

impl Into<Member> for MemberRaw {
    fn into(self) -> Member {
        Member {
            id: self.member_uid.into(),
            organization_id: self.organization_uid.into(),
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            active: self.active,
            groups: self.groups,
        }
    }
}

#[async_trait::async_trait]
impl IMemberRepo for PostgresMemberRepo {
    async fn insert(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members
            (member_uid, organization_uid, first_name, last_name, phone, active, groups)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(member.id.inner_ref())
        .bind(member.organization_id.inner_ref())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone)
        .bind(member.active)
        .bind(&member.groups)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, member: &Member) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE members
            SET first_name = $2, last_name = $3, phone = $4, active = $5, groups = $6
            WHERE member_uid = $1
            "#,
        )
        .bind(member.id.inner_ref())
        .bind(&member.first_name)
        .bind(&member.last_name)
        .bind(&member.phone)
        .bind(member.active)
        .bind(&member.groups)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, member_id: &ID) -> Option<Member> {
        sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE member_uid = $1
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find member query failed: {:?}", e);
            None
        })
        .map(|member| member.into())
    }

    async fn find_by_org(&self, organization_id: &ID) -> anyhow::Result<Vec<Member>> {
        let members = sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE organization_uid = $1
            "#,
        )
        .bind(organization_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(members.into_iter().map(|member| member.into()).collect())
    }

    async fn find_by_ids(
        &self,
        organization_id: &ID,
        member_ids: &[ID],
    ) -> anyhow::Result<Vec<Member>> {
        let ids = member_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let members = sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE organization_uid = $1 AND member_uid = ANY($2)
            "#,
        )
        .bind(organization_id.inner_ref())
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(members.into_iter().map(|member| member.into()).collect())
    }

    async fn find_by_group_names(
        &self,
        organization_id: &ID,
        group_names: &[String],
    ) -> anyhow::Result<Vec<Member>> {
        let members = sqlx::query_as::<_, MemberRaw>(
            r#"
            SELECT * FROM members
            WHERE organization_uid = $1 AND groups && $2
            "#,
        )
        .bind(organization_id.inner_ref())
        .bind(group_names)
        .fetch_all(&self.pool)
        .await?;
        Ok(members.into_iter().map(|member| member.into()).collect())
    }

    async fn delete(&self, member_id: &ID) -> Option<Member> {
        sqlx::query_as::<_, MemberRaw>(
            r#"
            DELETE FROM members
            WHERE member_uid = $1
            RETURNING *
            "#,
        )
        .bind(member_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|member| member.into())
    }
}
