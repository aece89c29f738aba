use crate::dtos::OrganizationDTO;
use forening_domain::{Organization, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub organization: OrganizationDTO,
}

impl OrganizationResponse {
    pub fn new(organization: Organization) -> Self {
        Self {
            organization: OrganizationDTO::new(&organization),
        }
    }
}

pub mod create_organization {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub code: String,
    }

    pub type APIResponse = OrganizationResponse;
}

pub mod get_organization {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    pub type APIResponse = OrganizationResponse;
}

pub mod set_organization_sms {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub sender_id: String,
        pub api_key: String,
        pub api_url: String,
        pub country_code: String,
    }

    pub type APIResponse = OrganizationResponse;
}
