use crate::shared::entity::{Entity, ID};

/// A contactable person belonging to an `Organization`.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ID,
    pub organization_id: ID,
    pub first_name: String,
    pub last_name: String,
    /// Raw phone number as entered, normalized only at dispatch time
    pub phone: Option<String>,
    pub active: bool,
    /// Names of the `MemberGroup`s this member belongs to
    pub groups: Vec<String>,
}

impl Member {
    pub fn new(organization_id: ID, first_name: String, last_name: String) -> Self {
        Self {
            id: Default::default(),
            organization_id,
            first_name,
            last_name,
            phone: None,
            active: true,
            groups: Vec::new(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn is_in_any_group(&self, group_names: &[String]) -> bool {
        self.groups.iter().any(|g| group_names.contains(g))
    }
}

impl Entity for Member {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A named subset of an organization's members, used as a reminder
/// recipient selector.
#[derive(Debug, Clone)]
pub struct MemberGroup {
    pub id: ID,
    pub organization_id: ID,
    pub name: String,
}

impl MemberGroup {
    pub fn new(organization_id: ID, name: String) -> Self {
        Self {
            id: Default::default(),
            organization_id,
            name,
        }
    }
}

impl Entity for MemberGroup {
    fn id(&self) -> &ID {
        &self.id
    }
}
