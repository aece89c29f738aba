mod inmemory;
mod postgres;

use forening_domain::{MessageTemplate, ID};
pub use inmemory::InMemoryTemplateRepo;
pub use postgres::PostgresTemplateRepo;

#[async_trait::async_trait]
pub trait ITemplateRepo: Send + Sync {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()>;
    async fn find(&self, template_id: &ID) -> Option<MessageTemplate>;
    async fn delete(&self, template_id: &ID) -> Option<MessageTemplate>;
}

#[cfg(test)]
mod tests {
    use crate::ForeningContext;
    use forening_domain::{MessageTemplate, Organization};

    #[tokio::test]
    async fn create_find_delete() {
        let ctx = ForeningContext::create_inmemory();
        let org = Organization::new("Korpset".into());
        let template = MessageTemplate::new(
            org.id.clone(),
            "Standard".into(),
            "Hei {FirstName}, husk {EventName} {EventDate}".into(),
        );

        assert!(ctx.repos.templates.insert(&template).await.is_ok());
        let found = ctx.repos.templates.find(&template.id).await.unwrap();
        assert_eq!(found.body, template.body);

        assert!(ctx.repos.templates.delete(&template.id).await.is_some());
        assert!(ctx.repos.templates.find(&template.id).await.is_none());
    }
}
