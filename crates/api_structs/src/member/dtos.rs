use forening_domain::{Member, MemberGroup, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberDTO {
    pub id: ID,
    pub organization_id: ID,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub active: bool,
    pub groups: Vec<String>,
}

impl MemberDTO {
    pub fn new(member: Member) -> Self {
        Self {
            id: member.id,
            organization_id: member.organization_id,
            first_name: member.first_name,
            last_name: member.last_name,
            phone: member.phone,
            active: member.active,
            groups: member.groups,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MemberGroupDTO {
    pub id: ID,
    pub organization_id: ID,
    pub name: String,
}

impl MemberGroupDTO {
    pub fn new(group: MemberGroup) -> Self {
        Self {
            id: group.id,
            organization_id: group.organization_id,
            name: group.name,
        }
    }
}
