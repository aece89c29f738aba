mod inmemory;
mod postgres;

use forening_domain::{Organization, ID};
pub use inmemory::InMemoryOrganizationRepo;
pub use postgres::PostgresOrganizationRepo;

#[async_trait::async_trait]
pub trait IOrganizationRepo: Send + Sync {
    async fn insert(&self, organization: &Organization) -> anyhow::Result<()>;
    async fn save(&self, organization: &Organization) -> anyhow::Result<()>;
    async fn find(&self, organization_id: &ID) -> Option<Organization>;
    async fn delete(&self, organization_id: &ID) -> Option<Organization>;
}

#[cfg(test)]
mod tests {
    use crate::ForeningContext;
    use forening_domain::{Entity, Organization, SmsSettings};

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = ForeningContext::create_inmemory();
        let organization = Organization::new("Korpset".into());

        // Insert
        assert!(ctx.repos.organizations.insert(&organization).await.is_ok());

        // Find
        let res = ctx
            .repos
            .organizations
            .find(&organization.id)
            .await
            .unwrap();
        assert!(res.eq(&organization));

        // Delete
        let res = ctx.repos.organizations.delete(&organization.id).await;
        assert!(res.is_some());
        assert!(res.unwrap().eq(&organization));

        // Find
        assert!(ctx
            .repos
            .organizations
            .find(&organization.id)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn update() {
        let ctx = ForeningContext::create_inmemory();
        let mut organization = Organization::new("Korpset".into());
        assert!(ctx.repos.organizations.insert(&organization).await.is_ok());

        organization.settings.sms = Some(
            SmsSettings::new(
                "Korpset".into(),
                "secret".into(),
                "https://sms.example.com/send".into(),
                "+47".into(),
            )
            .unwrap(),
        );

        // Save
        assert!(ctx.repos.organizations.save(&organization).await.is_ok());

        // Find
        let res = ctx
            .repos
            .organizations
            .find(&organization.id)
            .await
            .unwrap();
        assert!(res.settings.sms.is_some());
    }
}
