use crate::dtos::MessageTemplateDTO;
use forening_domain::{MessageTemplate, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplateResponse {
    pub template: MessageTemplateDTO,
}

impl MessageTemplateResponse {
    pub fn new(template: MessageTemplate) -> Self {
        Self {
            template: MessageTemplateDTO::new(template),
        }
    }
}

pub mod create_template {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub body: String,
    }

    pub type APIResponse = MessageTemplateResponse;
}
