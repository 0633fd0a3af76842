//! Organization repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Organization, OrganizationId};
use crate::domain::user::User;
use crate::domain::DomainError;

/// Parameters for creating a new organization
#[derive(Debug, Clone)]
pub struct CreateOrganizationParams {
    /// Caller-supplied id; a fresh one is generated when absent
    pub id: Option<OrganizationId>,
    pub name: String,
    pub description: String,
    /// Initial admin user, bound to the org admin policy
    pub admin_user: Option<AdminUserParams>,
}

/// Initial admin user for a new organization
#[derive(Debug, Clone)]
pub struct AdminUserParams {
    pub name: String,
}

/// Options for organization creation
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateOptions {
    /// Create the bare organization row only, skipping default policies
    /// and the admin user
    pub create_only: bool,
}

/// Result of a successful organization creation
#[derive(Debug, Clone)]
pub struct OrganizationCreateResult {
    /// Canonical snapshot re-read after commit
    pub organization: Organization,
    /// The admin user, when one was requested and created
    pub user: Option<User>,
}

/// Parameters for updating an organization
#[derive(Debug, Clone)]
pub struct UpdateOrganizationParams {
    pub id: OrganizationId,
    pub name: String,
    pub description: String,
}

/// Repository trait for organization storage
///
/// `create` and `delete_by_id` are all-or-nothing: implementations must
/// never leave a partially created or partially deleted organization
/// visible outside their own transaction.
#[async_trait]
pub trait OrganizationRepository: Send + Sync + Debug {
    /// List all organizations, ordered by case-insensitive name ascending
    async fn list(&self) -> Result<Vec<Organization>, DomainError>;

    /// Create an organization, its default policies and optionally an
    /// admin user holding the admin policy
    async fn create(
        &self,
        params: CreateOrganizationParams,
        opts: CreateOptions,
    ) -> Result<OrganizationCreateResult, DomainError>;

    /// Get an organization by id
    async fn read_by_id(&self, id: &OrganizationId) -> Result<Organization, DomainError>;

    /// Update an organization's name and description
    async fn update(&self, params: UpdateOrganizationParams) -> Result<Organization, DomainError>;

    /// Delete an organization and everything it transitively owns
    async fn delete_by_id(&self, id: &OrganizationId) -> Result<(), DomainError>;
}
