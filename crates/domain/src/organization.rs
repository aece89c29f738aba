use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// An `Organization` acts as a tenant boundary. Members, groups, events
/// and every dispatch record belong to exactly one organization and no
/// lookup is allowed to cross it.
#[derive(Debug, Clone)]
pub struct Organization {
    pub id: ID,
    pub name: String,
    pub settings: OrganizationSettings,
}

#[derive(Debug, Clone, Default)]
pub struct OrganizationSettings {
    pub sms: Option<SmsSettings>,
}

/// Per-organization SMS provider configuration. An organization without
/// this cannot dispatch reminders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SmsSettings {
    /// Sender name displayed on the receiving handset
    pub sender_id: String,
    pub api_key: String,
    pub api_url: String,
    /// Prefix applied to national phone numbers, e.g. "+47"
    pub country_code: String,
}

impl SmsSettings {
    pub fn new(
        sender_id: String,
        api_key: String,
        api_url: String,
        country_code: String,
    ) -> anyhow::Result<Self> {
        let parsed_url = url::Url::parse(&api_url)?;
        let allowed_schemes = vec!["https", "http"];
        if !allowed_schemes.contains(&parsed_url.scheme()) {
            return Err(anyhow::anyhow!(
                "Unsupported scheme for SMS api url: {}",
                api_url
            ));
        }
        if sender_id.is_empty() || sender_id.len() > 11 {
            // Alphanumeric sender ids are capped at 11 chars by GSM 03.38
            return Err(anyhow::anyhow!("Invalid SMS sender id: {}", sender_id));
        }
        Ok(Self {
            sender_id,
            api_key,
            api_url,
            country_code,
        })
    }
}

impl Organization {
    pub fn new(name: String) -> Self {
        Self {
            id: Default::default(),
            name,
            settings: Default::default(),
        }
    }
}

impl Entity for Organization {
    fn id(&self) -> &ID {
        &self.id
    }
}
