//! Organization service - validation and lifecycle orchestration

use std::sync::Arc;
use tracing::info;

use crate::domain::organization::{
    validate_org_description, validate_org_name, validate_user_name,
    AdminUserParams, CreateOptions, CreateOrganizationParams, Organization,
    OrganizationCreateResult, OrganizationId, OrganizationRepository, UpdateOrganizationParams,
};
use crate::domain::DomainError;

/// Request for creating a new organization
#[derive(Debug, Clone)]
pub struct CreateOrganizationRequest {
    /// Caller-supplied id; generated when absent
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    /// Name of the initial admin user, if one should be created
    pub admin_user_name: Option<String>,
    /// Skip default policies and the admin user
    pub create_only: bool,
}

/// Request for updating an organization
#[derive(Debug, Clone)]
pub struct UpdateOrganizationRequest {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Organization lifecycle service
///
/// Validates caller input at the boundary and delegates to the repository,
/// whose implementations carry the transactional guarantees.
#[derive(Debug)]
pub struct OrganizationService<R: OrganizationRepository> {
    repository: Arc<R>,
}

impl<R: OrganizationRepository> OrganizationService<R> {
    /// Create a new organization service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List all organizations, ordered by case-insensitive name
    pub async fn list(&self) -> Result<Vec<Organization>, DomainError> {
        self.repository.list().await
    }

    /// Create an organization with its default security posture
    pub async fn create(
        &self,
        request: CreateOrganizationRequest,
    ) -> Result<OrganizationCreateResult, DomainError> {
        validate_org_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_org_description(&request.description)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let id = request
            .id
            .map(OrganizationId::new)
            .transpose()
            .map_err(|e| DomainError::invalid_id(e.to_string()))?;

        let admin_user = match request.admin_user_name {
            Some(name) => {
                validate_user_name(&name).map_err(|e| DomainError::validation(e.to_string()))?;
                Some(AdminUserParams { name })
            }
            None => None,
        };

        info!(
            name = %request.name,
            create_only = request.create_only,
            "Creating organization"
        );

        self.repository
            .create(
                CreateOrganizationParams {
                    id,
                    name: request.name,
                    description: request.description,
                    admin_user,
                },
                CreateOptions {
                    create_only: request.create_only,
                },
            )
            .await
    }

    /// Get an organization by id
    pub async fn get(&self, id: &str) -> Result<Organization, DomainError> {
        let org_id = self.parse_id(id)?;
        self.repository.read_by_id(&org_id).await
    }

    /// Update an organization's name and description
    pub async fn update(
        &self,
        request: UpdateOrganizationRequest,
    ) -> Result<Organization, DomainError> {
        let id = self.parse_id(&request.id)?;
        validate_org_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_org_description(&request.description)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        self.repository
            .update(UpdateOrganizationParams {
                id,
                name: request.name,
                description: request.description,
            })
            .await
    }

    /// Delete an organization and everything it transitively owns
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let org_id = self.parse_id(id)?;
        info!(org_id = %org_id, "Deleting organization");
        self.repository.delete_by_id(&org_id).await
    }

    fn parse_id(&self, id: &str) -> Result<OrganizationId, DomainError> {
        OrganizationId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::organization::mock::MockOrganizationRepository;

    fn service() -> OrganizationService<MockOrganizationRepository> {
        OrganizationService::new(Arc::new(MockOrganizationRepository::new()))
    }

    fn create_request(id: &str, name: &str) -> CreateOrganizationRequest {
        CreateOrganizationRequest {
            id: Some(id.to_string()),
            name: name.to_string(),
            description: format!("{} description", name),
            admin_user_name: None,
            create_only: false,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();

        let result = service.create(create_request("org1", "Acme")).await.unwrap();
        assert_eq!(result.organization.id.as_str(), "org1");
        assert!(result.user.is_none());

        let org = service.get("org1").await.unwrap();
        assert_eq!(org.name, "Acme");
    }

    #[tokio::test]
    async fn test_create_with_admin_user() {
        let service = service();

        let mut request = create_request("org1", "Acme");
        request.admin_user_name = Some("alice".to_string());

        let result = service.create(request).await.unwrap();
        let user = result.user.unwrap();
        assert_eq!(user.name, "alice");
        assert_eq!(user.org_id.as_str(), "org1");
    }

    #[tokio::test]
    async fn test_create_generates_id_when_absent() {
        let service = service();

        let mut request = create_request("unused", "Acme");
        request.id = None;

        let result = service.create(request).await.unwrap();
        assert!(!result.organization.id.as_str().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let service = service();

        let request = create_request("org1", "");
        let result = service.create(request).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_id() {
        let service = service();

        let mut request = create_request("org1", "Acme");
        request.id = Some("-bad-".to_string());

        let result = service.create(request).await;
        assert!(matches!(result, Err(DomainError::InvalidId { .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_admin_user_name() {
        let service = service();

        let mut request = create_request("org1", "Acme");
        request.admin_user_name = Some(String::new());

        let result = service.create(request).await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_missing_not_found() {
        let service = service();

        let result = service.get("ghost").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_is_idempotent() {
        let service = service();
        service.create(create_request("org1", "Acme")).await.unwrap();

        let first = service.get("org1").await.unwrap();
        let second = service.get("org1").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_update() {
        let service = service();
        service.create(create_request("org1", "Acme")).await.unwrap();

        let org = service
            .update(UpdateOrganizationRequest {
                id: "org1".to_string(),
                name: "Acme Holdings".to_string(),
                description: "renamed".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(org.name, "Acme Holdings");
        assert_eq!(service.get("org1").await.unwrap().name, "Acme Holdings");
    }

    #[tokio::test]
    async fn test_update_missing_not_found() {
        let service = service();

        let result = service
            .update(UpdateOrganizationRequest {
                id: "ghost".to_string(),
                name: "Ghost".to_string(),
                description: String::new(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_then_get_not_found() {
        let service = service();
        service.create(create_request("org1", "Acme")).await.unwrap();

        service.delete("org1").await.unwrap();

        let result = service.get("org1").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_not_found() {
        let service = service();

        let result = service.delete("ghost").await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_ordering() {
        let service = service();

        for (id, name) in [("a1", "zulu"), ("a2", "ALPHA"), ("a3", "mike")] {
            service.create(create_request(id, name)).await.unwrap();
        }

        let names: Vec<String> = service
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.name)
            .collect();

        assert_eq!(names, vec!["ALPHA", "mike", "zulu"]);
    }

    #[tokio::test]
    async fn test_repository_failure_propagates_as_storage() {
        let repo = Arc::new(MockOrganizationRepository::new());
        repo.set_should_fail(true).await;
        let service = OrganizationService::new(Arc::clone(&repo));

        let result = service.create(create_request("org1", "Acme")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
