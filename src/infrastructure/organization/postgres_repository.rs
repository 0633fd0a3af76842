//! PostgreSQL organization repository
//!
//! Implements the transactional lifecycle pipelines: the ordered creation
//! steps (organization row, default policies, admin user) and the ordered
//! cascading deletion steps, each bracketed by one TransactionCoordinator
//! invocation. List, read and update are plain single-statement calls.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::{PgConnection, Row};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::organization::{
    CreateOptions, CreateOrganizationParams, Organization, OrganizationCreateResult,
    OrganizationId, OrganizationRepository, UpdateOrganizationParams,
};
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::policy::PolicyDefaultsProvider;
use crate::infrastructure::storage::TransactionCoordinator;

/// PostgreSQL implementation of OrganizationRepository
#[derive(Debug, Clone)]
pub struct PostgresOrganizationRepository {
    pool: PgPool,
    coordinator: TransactionCoordinator,
    defaults: Arc<dyn PolicyDefaultsProvider>,
}

impl PostgresOrganizationRepository {
    /// Create a new repository over the given pool and defaults provider
    pub fn new(pool: PgPool, defaults: Arc<dyn PolicyDefaultsProvider>) -> Self {
        let coordinator = TransactionCoordinator::new(pool.clone());
        Self {
            pool,
            coordinator,
            defaults,
        }
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn list(&self) -> Result<Vec<Organization>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description
            FROM organizations
            ORDER BY UPPER(name)
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list organizations: {}", e)))?;

        let mut organizations = Vec::with_capacity(rows.len());

        for row in rows {
            organizations.push(row_to_organization(&row)?);
        }

        Ok(organizations)
    }

    async fn create(
        &self,
        params: CreateOrganizationParams,
        opts: CreateOptions,
    ) -> Result<OrganizationCreateResult, DomainError> {
        let org_id = match params.id.clone() {
            Some(id) => id,
            None => OrganizationId::new(Uuid::new_v4().to_string())
                .map_err(|e| DomainError::invalid_id(e.to_string()))?,
        };

        let defaults = Arc::clone(&self.defaults);
        let pipeline_org_id = org_id.clone();

        let user = self
            .coordinator
            .run(move |conn| {
                Box::pin(async move {
                    insert_organization(
                        conn,
                        &pipeline_org_id,
                        &params.name,
                        &params.description,
                    )
                    .await?;

                    let mut user = None;
                    if !opts.create_only {
                        let admin_policy_id = defaults
                            .create_org_default_policies(conn, &pipeline_org_id)
                            .await?;

                        if let Some(admin) = &params.admin_user {
                            user = Some(
                                insert_admin_user(
                                    conn,
                                    &pipeline_org_id,
                                    &admin.name,
                                    admin_policy_id,
                                )
                                .await?,
                            );
                        }
                    }

                    Ok(user)
                })
            })
            .await?;

        // Canonical snapshot, re-read outside the transaction. The row was
        // just committed by this process, so a missing row here is a
        // storage fault, not NotFound.
        let organization = match self.read_by_id(&org_id).await {
            Ok(org) => org,
            Err(e) if e.is_not_found() => {
                return Err(DomainError::storage(format!(
                    "Organization '{}' missing after commit",
                    org_id
                )));
            }
            Err(e) => return Err(e),
        };

        info!(org_id = %organization.id, create_only = opts.create_only, "Created organization");

        Ok(OrganizationCreateResult { organization, user })
    }

    async fn read_by_id(&self, id: &OrganizationId) -> Result<Organization, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get organization: {}", e)))?;

        match row {
            Some(row) => row_to_organization(&row),
            None => Err(DomainError::not_found(format!(
                "Organization '{}' not found",
                id
            ))),
        }
    }

    async fn update(&self, params: UpdateOrganizationParams) -> Result<Organization, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE organizations
            SET name = $2, description = $3
            WHERE id = $1
            "#,
        )
        .bind(params.id.as_str())
        .bind(&params.name)
        .bind(&params.description)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update organization: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Organization '{}' not found",
                params.id
            )));
        }

        Ok(Organization::new(params.id, params.name, params.description))
    }

    async fn delete_by_id(&self, id: &OrganizationId) -> Result<(), DomainError> {
        let org_id = id.clone();

        self.coordinator
            .run(move |conn| {
                Box::pin(async move {
                    // Association rows must go before the users and teams
                    // they reference; users, teams and policies before the
                    // organization row itself. The final delete doubles as
                    // the sole existence check.
                    let user_ids: Vec<i64> =
                        sqlx::query_scalar("SELECT id FROM users WHERE org_id = $1")
                            .bind(org_id.as_str())
                            .fetch_all(&mut *conn)
                            .await
                            .map_err(|e| {
                                DomainError::storage(format!("Failed to collect user ids: {}", e))
                            })?;

                    if !user_ids.is_empty() {
                        sqlx::query("DELETE FROM team_members WHERE user_id = ANY($1)")
                            .bind(&user_ids)
                            .execute(&mut *conn)
                            .await
                            .map_err(|e| {
                                DomainError::storage(format!(
                                    "Failed to delete team members: {}",
                                    e
                                ))
                            })?;

                        sqlx::query("DELETE FROM user_policies WHERE user_id = ANY($1)")
                            .bind(&user_ids)
                            .execute(&mut *conn)
                            .await
                            .map_err(|e| {
                                DomainError::storage(format!(
                                    "Failed to delete user policies: {}",
                                    e
                                ))
                            })?;
                    }

                    let team_ids: Vec<i64> =
                        sqlx::query_scalar("SELECT id FROM teams WHERE org_id = $1")
                            .bind(org_id.as_str())
                            .fetch_all(&mut *conn)
                            .await
                            .map_err(|e| {
                                DomainError::storage(format!("Failed to collect team ids: {}", e))
                            })?;

                    if !team_ids.is_empty() {
                        sqlx::query("DELETE FROM team_policies WHERE team_id = ANY($1)")
                            .bind(&team_ids)
                            .execute(&mut *conn)
                            .await
                            .map_err(|e| {
                                DomainError::storage(format!(
                                    "Failed to delete team policies: {}",
                                    e
                                ))
                            })?;
                    }

                    sqlx::query("DELETE FROM policies WHERE org_id = $1")
                        .bind(org_id.as_str())
                        .execute(&mut *conn)
                        .await
                        .map_err(|e| {
                            DomainError::storage(format!("Failed to delete policies: {}", e))
                        })?;

                    sqlx::query("DELETE FROM teams WHERE org_id = $1")
                        .bind(org_id.as_str())
                        .execute(&mut *conn)
                        .await
                        .map_err(|e| {
                            DomainError::storage(format!("Failed to delete teams: {}", e))
                        })?;

                    sqlx::query("DELETE FROM users WHERE org_id = $1")
                        .bind(org_id.as_str())
                        .execute(&mut *conn)
                        .await
                        .map_err(|e| {
                            DomainError::storage(format!("Failed to delete users: {}", e))
                        })?;

                    let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
                        .bind(org_id.as_str())
                        .execute(&mut *conn)
                        .await
                        .map_err(|e| {
                            DomainError::storage(format!("Failed to delete organization: {}", e))
                        })?;

                    if result.rows_affected() == 0 {
                        return Err(DomainError::not_found(format!(
                            "Organization '{}' not found",
                            org_id
                        )));
                    }

                    Ok(())
                })
            })
            .await?;

        info!(org_id = %id, "Deleted organization");

        Ok(())
    }
}

async fn insert_organization(
    conn: &mut PgConnection,
    id: &OrganizationId,
    name: &str,
    description: &str,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO organizations (id, name, description)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(id.as_str())
    .bind(name)
    .bind(description)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e.to_string()) {
            DomainError::conflict(format!("Organization '{}' already exists", id))
        } else {
            DomainError::storage(format!("Failed to insert organization: {}", e))
        }
    })?;

    Ok(())
}

/// Insert the organization's admin user and bind it to the admin policy.
///
/// Both statements run on the transactional connection, so a failure in
/// either aborts the whole creation pipeline.
async fn insert_admin_user(
    conn: &mut PgConnection,
    org_id: &OrganizationId,
    name: &str,
    admin_policy_id: i64,
) -> Result<User, DomainError> {
    let user_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO users (name, org_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(org_id.as_str())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to insert admin user: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO user_policies (user_id, policy_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(user_id)
    .bind(admin_policy_id)
    .execute(&mut *conn)
    .await
    .map_err(|e| DomainError::storage(format!("Failed to assign admin policy: {}", e)))?;

    Ok(User::new(user_id, name, org_id.clone()))
}

fn row_to_organization(row: &sqlx::postgres::PgRow) -> Result<Organization, DomainError> {
    let id: String = row.get("id");
    let name: String = row.get("name");
    let description: String = row.get("description");

    let org_id = OrganizationId::new(id)
        .map_err(|e| DomainError::storage(format!("Invalid organization ID in database: {}", e)))?;

    Ok(Organization::new(org_id, name, description))
}

fn is_unique_violation(message: &str) -> bool {
    message.contains("duplicate key") || message.contains("unique constraint")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(
            "error returned from database: duplicate key value violates unique constraint \"organizations_pkey\""
        ));
        assert!(!is_unique_violation("connection closed"));
    }
}
