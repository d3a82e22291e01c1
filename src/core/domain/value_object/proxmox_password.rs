use crate::core::domain::error::ValidationError;
use std::fmt;

/// A Proxmox password (plaintext, only held for the login call).
#[derive(Clone)]
pub struct ProxmoxPassword(String);

impl ProxmoxPassword {
    /// Creates a validated password.
    pub fn new(password: String) -> Result<Self, ValidationError> {
        validate_password(&password)?;
        Ok(Self(password))
    }

    /// Returns the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProxmoxPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProxmoxPassword(<redacted>)")
    }
}

/// Validates a password.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Field {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    if password.len() > 128 {
        return Err(ValidationError::Format(
            "Password cannot exceed 128 characters".to_string(),
        ));
    }
    Ok(())
}
