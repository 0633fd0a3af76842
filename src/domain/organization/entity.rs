//! Organization entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{validate_org_id, OrgValidationError};

/// Organization identifier - alphanumeric plus hyphens/underscores, max 128 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrganizationId(String);

impl OrganizationId {
    /// Create a new OrganizationId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, OrgValidationError> {
        let id = id.into();
        validate_org_id(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrganizationId {
    type Error = OrgValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrganizationId> for String {
    fn from(id: OrganizationId) -> Self {
        id.0
    }
}

impl std::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root multi-tenant entity owning policies, users and teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: OrganizationId,
    /// Human-readable name
    pub name: String,
    /// Free-form description
    pub description: String,
}

impl Organization {
    pub fn new(
        id: OrganizationId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_id_valid() {
        let id = OrganizationId::new("org1").unwrap();
        assert_eq!(id.as_str(), "org1");
        assert_eq!(id.to_string(), "org1");
    }

    #[test]
    fn test_organization_id_invalid() {
        assert!(OrganizationId::new("").is_err());
        assert!(OrganizationId::new("-org").is_err());
        assert!(OrganizationId::new("org one").is_err());
    }

    #[test]
    fn test_organization_id_serde_round_trip() {
        let id = OrganizationId::new("acme-corp").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"acme-corp\"");

        let back: OrganizationId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_organization_id_serde_rejects_invalid() {
        let result: Result<OrganizationId, _> = serde_json::from_str("\"-bad-\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_organization_creation() {
        let id = OrganizationId::new("org1").unwrap();
        let org = Organization::new(id, "Acme", "Acme Corporation");

        assert_eq!(org.id.as_str(), "org1");
        assert_eq!(org.name, "Acme");
        assert_eq!(org.description, "Acme Corporation");
    }
}
