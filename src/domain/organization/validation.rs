//! Organization validation

use thiserror::Error;

/// Errors that can occur during organization validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrgValidationError {
    #[error("Organization ID cannot be empty")]
    EmptyId,

    #[error("Organization ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Organization ID can only contain alphanumeric characters, hyphens and underscores")]
    InvalidIdCharacters,

    #[error("Organization ID cannot start or end with a separator")]
    InvalidIdFormat,

    #[error("Organization name cannot be empty")]
    EmptyName,

    #[error("Organization name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Organization description cannot exceed {0} characters")]
    DescriptionTooLong(usize),

    #[error("User name cannot be empty")]
    EmptyUserName,

    #[error("User name cannot exceed {0} characters")]
    UserNameTooLong(usize),
}

const MAX_ORG_ID_LENGTH: usize = 128;
const MAX_ORG_NAME_LENGTH: usize = 255;
const MAX_ORG_DESCRIPTION_LENGTH: usize = 1024;
const MAX_USER_NAME_LENGTH: usize = 255;

/// Validate an organization ID
pub fn validate_org_id(id: &str) -> Result<(), OrgValidationError> {
    if id.is_empty() {
        return Err(OrgValidationError::EmptyId);
    }

    if id.len() > MAX_ORG_ID_LENGTH {
        return Err(OrgValidationError::IdTooLong(MAX_ORG_ID_LENGTH));
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(OrgValidationError::InvalidIdCharacters);
    }

    if id.starts_with(['-', '_']) || id.ends_with(['-', '_']) {
        return Err(OrgValidationError::InvalidIdFormat);
    }

    Ok(())
}

/// Validate an organization name
pub fn validate_org_name(name: &str) -> Result<(), OrgValidationError> {
    if name.is_empty() {
        return Err(OrgValidationError::EmptyName);
    }

    if name.len() > MAX_ORG_NAME_LENGTH {
        return Err(OrgValidationError::NameTooLong(MAX_ORG_NAME_LENGTH));
    }

    Ok(())
}

/// Validate an organization description
pub fn validate_org_description(description: &str) -> Result<(), OrgValidationError> {
    if description.len() > MAX_ORG_DESCRIPTION_LENGTH {
        return Err(OrgValidationError::DescriptionTooLong(
            MAX_ORG_DESCRIPTION_LENGTH,
        ));
    }

    Ok(())
}

/// Validate an admin user name
pub fn validate_user_name(name: &str) -> Result<(), OrgValidationError> {
    if name.is_empty() {
        return Err(OrgValidationError::EmptyUserName);
    }

    if name.len() > MAX_USER_NAME_LENGTH {
        return Err(OrgValidationError::UserNameTooLong(MAX_USER_NAME_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_org_id() {
        assert!(validate_org_id("org1").is_ok());
        assert!(validate_org_id("acme-corp").is_ok());
        assert!(validate_org_id("WONKA").is_ok());
        assert!(validate_org_id("org_42").is_ok());
    }

    #[test]
    fn test_empty_org_id() {
        assert_eq!(validate_org_id(""), Err(OrgValidationError::EmptyId));
    }

    #[test]
    fn test_org_id_too_long() {
        let id = "a".repeat(MAX_ORG_ID_LENGTH + 1);
        assert_eq!(
            validate_org_id(&id),
            Err(OrgValidationError::IdTooLong(MAX_ORG_ID_LENGTH))
        );
    }

    #[test]
    fn test_org_id_invalid_characters() {
        assert_eq!(
            validate_org_id("org 1"),
            Err(OrgValidationError::InvalidIdCharacters)
        );
        assert_eq!(
            validate_org_id("org/1"),
            Err(OrgValidationError::InvalidIdCharacters)
        );
    }

    #[test]
    fn test_org_id_invalid_format() {
        assert_eq!(
            validate_org_id("-org"),
            Err(OrgValidationError::InvalidIdFormat)
        );
        assert_eq!(
            validate_org_id("org_"),
            Err(OrgValidationError::InvalidIdFormat)
        );
    }

    #[test]
    fn test_org_name() {
        assert!(validate_org_name("Acme Corporation").is_ok());
        assert_eq!(validate_org_name(""), Err(OrgValidationError::EmptyName));

        let name = "a".repeat(MAX_ORG_NAME_LENGTH + 1);
        assert_eq!(
            validate_org_name(&name),
            Err(OrgValidationError::NameTooLong(MAX_ORG_NAME_LENGTH))
        );
    }

    #[test]
    fn test_org_description() {
        assert!(validate_org_description("").is_ok());
        assert!(validate_org_description("A rather ordinary description").is_ok());

        let description = "a".repeat(MAX_ORG_DESCRIPTION_LENGTH + 1);
        assert_eq!(
            validate_org_description(&description),
            Err(OrgValidationError::DescriptionTooLong(
                MAX_ORG_DESCRIPTION_LENGTH
            ))
        );
    }

    #[test]
    fn test_user_name() {
        assert!(validate_user_name("alice").is_ok());
        assert_eq!(
            validate_user_name(""),
            Err(OrgValidationError::EmptyUserName)
        );
    }
}
