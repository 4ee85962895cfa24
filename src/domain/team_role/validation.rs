//! Team role validation

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while validating an incoming team role
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TeamRoleValidationError {
    #[error("Team role uuid cannot be empty")]
    EmptyUuid,

    #[error("Team role uuid cannot exceed {0} characters")]
    UuidTooLong(usize),

    #[error("Team role display cannot be empty")]
    EmptyDisplay,

    #[error("Team role name cannot be empty")]
    EmptyName,

    #[error("Team role members must be a JSON array")]
    MembersNotArray,
}

const MAX_UUID_LENGTH: usize = 255;

/// Validate an external team role uuid
pub fn validate_team_role_uuid(uuid: &str) -> Result<(), TeamRoleValidationError> {
    if uuid.trim().is_empty() {
        return Err(TeamRoleValidationError::EmptyUuid);
    }

    if uuid.chars().count() > MAX_UUID_LENGTH {
        return Err(TeamRoleValidationError::UuidTooLong(MAX_UUID_LENGTH));
    }

    Ok(())
}

pub(crate) fn validate_labels(display: &str, name: &str) -> Result<(), TeamRoleValidationError> {
    if display.trim().is_empty() {
        return Err(TeamRoleValidationError::EmptyDisplay);
    }

    if name.trim().is_empty() {
        return Err(TeamRoleValidationError::EmptyName);
    }

    Ok(())
}

pub(crate) fn validate_members(members: &Value) -> Result<(), TeamRoleValidationError> {
    if members.is_array() {
        Ok(())
    } else {
        Err(TeamRoleValidationError::MembersNotArray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_uuid() {
        assert!(validate_team_role_uuid("8d4a4488-c2cc-11de-8d13-0010c6dffd0f").is_ok());
        assert!(validate_team_role_uuid("legacy-role").is_ok());
    }

    #[test]
    fn test_empty_uuid() {
        assert_eq!(
            validate_team_role_uuid("   "),
            Err(TeamRoleValidationError::EmptyUuid)
        );
    }

    #[test]
    fn test_uuid_too_long() {
        let long = "a".repeat(256);
        assert_eq!(
            validate_team_role_uuid(&long),
            Err(TeamRoleValidationError::UuidTooLong(255))
        );
    }

    #[test]
    fn test_uuid_length_counts_characters() {
        assert!(validate_team_role_uuid(&"é".repeat(255)).is_ok());
        assert_eq!(
            validate_team_role_uuid(&"é".repeat(256)),
            Err(TeamRoleValidationError::UuidTooLong(255))
        );
    }

    #[test]
    fn test_labels() {
        assert!(validate_labels("Nurse", "nurse").is_ok());
        assert_eq!(validate_labels("", "nurse"), Err(TeamRoleValidationError::EmptyDisplay));
        assert_eq!(validate_labels("Nurse", " "), Err(TeamRoleValidationError::EmptyName));
    }

    #[test]
    fn test_members_shape() {
        assert!(validate_members(&json!([])).is_ok());
        assert!(validate_members(&json!([{"uuid": "m-1"}])).is_ok());
        assert_eq!(
            validate_members(&json!({"uuid": "m-1"})),
            Err(TeamRoleValidationError::MembersNotArray)
        );
    }
}
