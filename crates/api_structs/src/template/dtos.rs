use forening_domain::{MessageTemplate, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateDTO {
    pub id: ID,
    pub organization_id: ID,
    pub name: String,
    pub body: String,
}

impl MessageTemplateDTO {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            id: template.id,
            organization_id: template.organization_id,
            name: template.name,
            body: template.body,
        }
    }
}
