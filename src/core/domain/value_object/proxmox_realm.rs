use crate::core::domain::error::ValidationError;

/// A validated Proxmox authentication realm (`pam`, `pve`, or the id of a
/// configured LDAP/AD/OpenID realm).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxmoxRealm(String);

impl ProxmoxRealm {
    /// Realm submitted when the configured identity carries no suffix.
    pub const DEFAULT: &'static str = "pam";

    /// Creates a validated realm.
    pub fn new(realm: String) -> Result<Self, ValidationError> {
        validate_realm(&realm)?;
        Ok(Self(realm))
    }

    /// Returns the realm as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProxmoxRealm {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Validates a realm identifier.
pub(crate) fn validate_realm(realm: &str) -> Result<(), ValidationError> {
    if realm.is_empty() {
        return Err(ValidationError::Field {
            field: "realm".to_string(),
            message: "Realm cannot be empty".to_string(),
        });
    }
    if realm.len() < 2 || realm.len() > 32 {
        return Err(ValidationError::Format(
            "Realm length must be between 2 and 32 characters".to_string(),
        ));
    }
    if !realm.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(ValidationError::Format(
            "Realm must start with a letter".to_string(),
        ));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.';
    if !realm.chars().all(allowed) {
        return Err(ValidationError::Format(
            "Realm contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
