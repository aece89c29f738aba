mod inmemory;
mod postgres;

use forening_domain::{Member, ID};
pub use inmemory::InMemoryMemberRepo;
pub use postgres::PostgresMemberRepo;

#[async_trait::async_trait]
pub trait IMemberRepo: Send + Sync {
    async fn insert(&self, member: &Member) -> anyhow::Result<()>;
    async fn save(&self, member: &Member) -> anyhow::Result<()>;
    async fn find(&self, member_id: &ID) -> Option<Member>;
    /// All members of the organization
    async fn find_by_org(&self, organization_id: &ID) -> anyhow::Result<Vec<Member>>;
    /// Members of the organization with the given ids
    async fn find_by_ids(
        &self,
        organization_id: &ID,
        member_ids: &[ID],
    ) -> anyhow::Result<Vec<Member>>;
    /// Members of the organization belonging to at least one of the
    /// given group names
    async fn find_by_group_names(
        &self,
        organization_id: &ID,
        group_names: &[String],
    ) -> anyhow::Result<Vec<Member>>;
    async fn delete(&self, member_id: &ID) -> Option<Member>;
}
