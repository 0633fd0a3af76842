//! Default policy set creation for new organizations

use async_trait::async_trait;
use sqlx::PgConnection;
use std::fmt::Debug;
use tracing::debug;

use crate::domain::organization::OrganizationId;
use crate::domain::policy::PolicyTemplate;
use crate::domain::DomainError;

/// Creates an organization's default policy set.
///
/// Implementations must execute against the transactional connection they
/// are handed, never against an independent transaction, so that the
/// policies commit or roll back together with the organization row.
#[async_trait]
pub trait PolicyDefaultsProvider: Send + Sync + Debug {
    /// Create the default policies for `org_id` and return the id of the
    /// admin policy
    async fn create_org_default_policies(
        &self,
        conn: &mut PgConnection,
        org_id: &OrganizationId,
    ) -> Result<i64, DomainError>;
}

/// PostgreSQL defaults provider inserting the built-in template set
#[derive(Debug, Default)]
pub struct PostgresPolicyDefaults;

impl PostgresPolicyDefaults {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PolicyDefaultsProvider for PostgresPolicyDefaults {
    async fn create_org_default_policies(
        &self,
        conn: &mut PgConnection,
        org_id: &OrganizationId,
    ) -> Result<i64, DomainError> {
        let mut admin_policy_id = None;

        for template in PolicyTemplate::org_defaults(org_id) {
            let policy_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO policies (version, name, org_id, statements)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(&template.version)
            .bind(&template.name)
            .bind(org_id.as_str())
            .bind(&template.statements)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to create default policy '{}': {}",
                    template.name, e
                ))
            })?;

            // The admin policy is the first template in the set
            admin_policy_id.get_or_insert(policy_id);
        }

        let admin_policy_id = admin_policy_id.ok_or_else(|| {
            DomainError::storage("Default policy set is empty, no admin policy created")
        })?;

        debug!(
            org_id = %org_id,
            admin_policy_id,
            "Created default policies for organization"
        );

        Ok(admin_policy_id)
    }
}
