use super::IGroupRepo;
use crate::repos::shared::inmemory_repo::*;
use forening_domain::{MemberGroup, ID};

pub struct InMemoryGroupRepo {
    groups: std::sync::Mutex<Vec<MemberGroup>>,
}

impl InMemoryGroupRepo {
    pub fn new() -> Self {
        Self {
            groups: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IGroupRepo for InMemoryGroupRepo {
    async fn insert(&self, group: &MemberGroup) -> anyhow::Result<()> {
        insert(group, &self.groups);
        Ok(())
    }

    async fn find(&self, group_id: &ID) -> Option<MemberGroup> {
        find(group_id, &self.groups)
    }

    async fn find_by_ids(
        &self,
        organization_id: &ID,
        group_ids: &[ID],
    ) -> anyhow::Result<Vec<MemberGroup>> {
        Ok(find_by(&self.groups, |g| {
            g.organization_id == *organization_id && group_ids.contains(&g.id)
        }))
    }

    async fn delete(&self, group_id: &ID) -> Option<MemberGroup> {
        delete(group_id, &self.groups)
    }
}
