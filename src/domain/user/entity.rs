//! User entity

use serde::{Deserialize, Serialize};

use crate::domain::organization::OrganizationId;

/// User belonging to exactly one organization
///
/// The id is storage-generated (BIGSERIAL) and only known once the row
/// has been inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Storage-generated identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Owning organization
    pub org_id: OrganizationId,
}

impl User {
    pub fn new(id: i64, name: impl Into<String>, org_id: OrganizationId) -> Self {
        Self {
            id,
            name: name.into(),
            org_id,
        }
    }
}
