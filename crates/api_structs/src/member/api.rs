use crate::dtos::{MemberDTO, MemberGroupDTO};
use forening_domain::{Member, MemberGroup, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub member: MemberDTO,
}

impl MemberResponse {
    pub fn new(member: Member) -> Self {
        Self {
            member: MemberDTO::new(member),
        }
    }
}

pub mod create_member {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub first_name: String,
        pub last_name: String,
        pub phone: Option<String>,
        pub groups: Option<Vec<String>>,
    }

    pub type APIResponse = MemberResponse;
}

pub mod get_members {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub members: Vec<MemberDTO>,
    }

    impl APIResponse {
        pub fn new(members: Vec<Member>) -> Self {
            Self {
                members: members.into_iter().map(MemberDTO::new).collect(),
            }
        }
    }
}

pub mod create_group {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub organization_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub group: MemberGroupDTO,
    }

    impl APIResponse {
        pub fn new(group: MemberGroup) -> Self {
            Self {
                group: MemberGroupDTO::new(group),
            }
        }
    }
}
