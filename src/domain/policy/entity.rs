//! Policy entity and default-policy templates

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::organization::OrganizationId;

/// Access policy belonging to exactly one organization
///
/// The statements document follows the `{"Statement": [{Effect, Action,
/// Resource}]}` shape and is stored as JSONB; this core never evaluates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Storage-generated identifier
    pub id: i64,
    /// Policy document version
    pub version: String,
    /// Display name
    pub name: String,
    /// Owning organization
    pub org_id: OrganizationId,
    /// Statement document, opaque to this core
    pub statements: serde_json::Value,
}

/// A policy before insertion, with the organization not yet bound
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyTemplate {
    pub version: String,
    pub name: String,
    pub statements: serde_json::Value,
}

impl PolicyTemplate {
    pub fn new(
        version: impl Into<String>,
        name: impl Into<String>,
        statements: serde_json::Value,
    ) -> Self {
        Self {
            version: version.into(),
            name: name.into(),
            statements,
        }
    }

    /// The default policy set created for every new organization
    ///
    /// The first template is the org admin policy; its inserted id is the
    /// one assigned to the organization's initial admin user.
    pub fn org_defaults(org_id: &OrganizationId) -> Vec<Self> {
        vec![
            Self::new(
                "0.1",
                "org admin",
                json!({
                    "Statement": [{
                        "Effect": "Allow",
                        "Action": ["*"],
                        "Resource": [format!("/authorization/organization/{}/*", org_id)],
                    }]
                }),
            ),
            Self::new(
                "0.1",
                "org read",
                json!({
                    "Statement": [{
                        "Effect": "Allow",
                        "Action": ["read"],
                        "Resource": [format!("/authorization/organization/{}/*", org_id)],
                    }]
                }),
            ),
        ]
    }
}
