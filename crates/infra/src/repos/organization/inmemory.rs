use super::IOrganizationRepo;
use crate::repos::shared::inmemory_repo::*;
use forening_domain::{Organization, ID};

pub struct InMemoryOrganizationRepo {
    organizations: std::sync::Mutex<Vec<Organization>>,
}

impl InMemoryOrganizationRepo {
    pub fn new() -> Self {
        Self {
            organizations: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IOrganizationRepo for InMemoryOrganizationRepo {
    async fn insert(&self, organization: &Organization) -> anyhow::Result<()> {
        insert(organization, &self.organizations);
        Ok(())
    }

    async fn save(&self, organization: &Organization) -> anyhow::Result<()> {
        save(organization, &self.organizations);
        Ok(())
    }

    async fn find(&self, organization_id: &ID) -> Option<Organization> {
        find(organization_id, &self.organizations)
    }

    async fn delete(&self, organization_id: &ID) -> Option<Organization> {
        delete(organization_id, &self.organizations)
    }
}
