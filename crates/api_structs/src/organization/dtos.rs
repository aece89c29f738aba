use forening_domain::{Organization, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDTO {
    pub id: ID,
    pub name: String,
    pub sms: Option<SmsSettingsDTO>,
}

/// SMS settings as echoed back to clients. The api key never leaves
/// the server.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SmsSettingsDTO {
    pub sender_id: String,
    pub api_url: String,
    pub country_code: String,
}

impl OrganizationDTO {
    pub fn new(organization: &Organization) -> Self {
        Self {
            id: organization.id.clone(),
            name: organization.name.clone(),
            sms: organization
                .settings
                .sms
                .as_ref()
                .map(|sms| SmsSettingsDTO {
                    sender_id: sms.sender_id.clone(),
                    api_url: sms.api_url.clone(),
                    country_code: sms.country_code.clone(),
                }),
        }
    }
}
