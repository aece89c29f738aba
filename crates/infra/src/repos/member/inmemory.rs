use super::IMemberRepo;
use crate::repos::shared::inmemory_repo::*;
use forening_domain::{Member, ID};

pub struct InMemoryMemberRepo {
    members: std::sync::Mutex<Vec<Member>>,
}

impl InMemoryMemberRepo {
    pub fn new() -> Self {
        Self {
            members: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMemberRepo for InMemoryMemberRepo {
    async fn insert(&self, member: &Member) -> anyhow::Result<()> {
        insert(member, &self.members);
        Ok(())
    }

    async fn save(&self, member: &Member) -> anyhow::Result<()> {
        save(member, &self.members);
        Ok(())
    }

    async fn find(&self, member_id: &ID) -> Option<Member> {
        find(member_id, &self.members)
    }

    async fn find_by_org(&self, organization_id: &ID) -> anyhow::Result<Vec<Member>> {
        Ok(find_by(&self.members, |m| {
            m.organization_id == *organization_id
        }))
    }

    async fn find_by_ids(
        &self,
        organization_id: &ID,
        member_ids: &[ID],
    ) -> anyhow::Result<Vec<Member>> {
        Ok(find_by(&self.members, |m| {
            m.organization_id == *organization_id && member_ids.contains(&m.id)
        }))
    }

    async fn find_by_group_names(
        &self,
        organization_id: &ID,
        group_names: &[String],
    ) -> anyhow::Result<Vec<Member>> {
        Ok(find_by(&self.members, |m| {
            m.organization_id == *organization_id && m.is_in_any_group(group_names)
        }))
    }

    async fn delete(&self, member_id: &ID) -> Option<Member> {
        delete(member_id, &self.members)
    }
}
