use super::ITemplateRepo;
use crate::repos::shared::inmemory_repo::*;
use forening_domain::{MessageTemplate, ID};

pub struct InMemoryTemplateRepo {
    templates: std::sync::Mutex<Vec<MessageTemplate>>,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self {
            templates: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ITemplateRepo for InMemoryTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        insert(template, &self.templates);
        Ok(())
    }

    async fn find(&self, template_id: &ID) -> Option<MessageTemplate> {
        find(template_id, &self.templates)
    }

    async fn delete(&self, template_id: &ID) -> Option<MessageTemplate> {
        delete(template_id, &self.templates)
    }
}
