//! Domain layer - Core business logic and entities

pub mod error;
pub mod organization;
pub mod policy;
pub mod team;
pub mod user;

pub use error::DomainError;
pub use organization::{
    validate_org_description, validate_org_id, validate_org_name, validate_user_name,
    AdminUserParams, CreateOptions, CreateOrganizationParams, Organization, OrganizationCreateResult,
    OrganizationId, OrganizationRepository, OrgValidationError, UpdateOrganizationParams,
};
pub use policy::{Policy, PolicyTemplate};
pub use team::Team;
pub use user::User;
