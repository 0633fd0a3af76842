//! Organization domain - entity, validation and repository contract

mod entity;
mod repository;
mod validation;

pub use entity::{Organization, OrganizationId};
pub use repository::{
    AdminUserParams, CreateOptions, CreateOrganizationParams, OrganizationCreateResult,
    OrganizationRepository, UpdateOrganizationParams,
};
pub use validation::{
    validate_org_description, validate_org_id, validate_org_name, validate_user_name,
    OrgValidationError,
};

#[cfg(test)]
pub use repository::mock;
