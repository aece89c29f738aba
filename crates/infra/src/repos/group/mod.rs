mod inmemory;
mod postgres;

use forening_domain::{MemberGroup, ID};
pub use inmemory::InMemoryGroupRepo;
pub use postgres::PostgresGroupRepo;

#[async_trait::async_trait]
pub trait IGroupRepo: Send + Sync {
    async fn insert(&self, group: &MemberGroup) -> anyhow::Result<()>;
    async fn find(&self, group_id: &ID) -> Option<MemberGroup>;
    /// Groups of the organization with the given ids
    async fn find_by_ids(
        &self,
        organization_id: &ID,
        group_ids: &[ID],
    ) -> anyhow::Result<Vec<MemberGroup>>;
    async fn delete(&self, group_id: &ID) -> Option<MemberGroup>;
}
