//! Team entity

use serde::{Deserialize, Serialize};

use crate::domain::organization::OrganizationId;

/// Team belonging to exactly one organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Storage-generated identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Owning organization
    pub org_id: OrganizationId,
}

impl Team {
    pub fn new(id: i64, name: impl Into<String>, org_id: OrganizationId) -> Self {
        Self {
            id,
            name: name.into(),
            org_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_creation() {
        let org_id = OrganizationId::new("org1").unwrap();
        let team = Team::new(3, "platform", org_id);

        assert_eq!(team.id, 3);
        assert_eq!(team.name, "platform");
        assert_eq!(team.org_id.as_str(), "org1");
    }
}
